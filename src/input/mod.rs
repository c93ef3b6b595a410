//! # 输入执行层
//!
//! 提供操作系统级指针和键盘事件的抽象接口。行为引擎通过该层向外部进程
//! 注入输入事件，本层是整个 crate 中唯一允许触碰真实输入设备的组件。
//!
//! ## 主要功能
//! - **指针原语**: 移动、按下、释放、点击、滚动
//! - **键盘原语**: 按键、按下、释放
//! - **位置查询**: 读取当前指针位置
//! - **错误传播**: 注入被操作系统拒绝时返回可区分的错误
//!
//! ## 模块结构
//! - `traits`: 输入执行能力的核心 trait 定义
//! - `mock`: 用于测试的记录型 Mock 实现
//!
//! ## 使用示例
//! ```rust
//! use humactor::input::{InputExecutor, MockInputExecutor, MouseButton};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = Arc::new(MockInputExecutor::new());
//! executor.move_to(100, 200).await?;
//! executor.click(MouseButton::Left).await?;
//! assert_eq!(executor.position().await, (100, 200));
//! # Ok(())
//! # }
//! ```

pub mod traits;
pub mod mock;

#[cfg(test)]
mod tests;

pub use traits::{InputExecutor, MouseButton, Point, ScrollDirection};

// Re-export mock for development/testing
pub use mock::{InputEvent, MockInputExecutor};
