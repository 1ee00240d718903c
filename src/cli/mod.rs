//! 命令行支持模块
//!
//! 结果渲染（表格、垂直、JSON）

mod printer;

pub use printer::{PrintMode, Printer};
