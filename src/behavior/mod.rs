//! # 行为合成引擎
//!
//! 合成统计学上接近人类操作的指针与键盘输入，用于规避行为指纹检测。
//!
//! ## 主要功能
//! - **路径合成**: 生成带随机控制点的贝塞尔曲线或缓动直线指针路径
//! - **时序模型**: 从截断正态分布中采样延迟，避免均匀随机的机器特征
//! - **输入错误注入**: 按相邻键模型模拟打字错误及其纠正
//! - **空闲行为**: 以微小动作填充空闲时间，避免输入流静止
//! - **动作历史**: 维护有界动作历史并派生行为统计
//!
//! ## 反检测特性
//! - 曲线/直线路径按 70/30 随机切换，路径形状本身不可指纹化
//! - 逐段随机化的移动节奏，消除匀速移动特征
//! - 钟形分布的延迟采样，而非均匀分布
//! - 低概率的打字犹豫与未纠正的输入错误
//!
//! ## 模块结构
//! - `timing`: 截断正态延迟采样
//! - `path`: 指针运动路径合成
//! - `keyboard`: 键盘相邻键表与错误注入
//! - `idle`: 空闲微动作状态机
//! - `history`: 有界动作历史与行为统计
//! - `cancel`: 协作式取消与操作完成状态
//! - `engine`: 行为引擎门面
//!
//! ## 使用示例
//! ```rust,no_run
//! use humactor::behavior::{BehaviorEngine, MoveOptions};
//! use humactor::config::BehaviorConfig;
//! use humactor::input::MockInputExecutor;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = Arc::new(MockInputExecutor::new());
//! let mut engine = BehaviorEngine::new(BehaviorConfig::default(), executor)?;
//!
//! engine.move_to(500, 300, MoveOptions::default()).await?;
//! println!("pattern: {:?}", engine.behavior_pattern());
//! # Ok(())
//! # }
//! ```

pub mod timing;
pub mod path;
pub mod keyboard;
pub mod history;
pub mod cancel;
pub mod engine;
pub mod idle;


pub use cancel::{CancelToken, Completion};
pub use engine::{BehaviorEngine, ClickOptions, MoveOptions, TypingOptions};
pub use history::{ActionEntry, ActionHistory, BehaviorPattern, HISTORY_CAPACITY};
pub use idle::MicroAction;
pub use keyboard::KeyStroke;
pub use path::{MotionPath, PathKind, MOVE_TOLERANCE};
pub use timing::{DelayWindow, TimingModel};
