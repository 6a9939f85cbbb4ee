pub mod dashscope;
pub mod structs;
