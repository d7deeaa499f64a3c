mod item;

pub use item::{InputItem, OutputEntry};
