//! 搜索服务模块
//!
//! - LiteralMatcher: 单页字面量匹配 (memchr)
//! - SearchTask: 分页扫描任务 (Close / Range)
//! - SearchService: 在 tokio blocking 线程池上运行任务

mod matcher;
mod service;
mod sink;
mod task;

pub use matcher::LiteralMatcher;
pub use service::{SearchService, CHANNEL_CAPACITY};
pub use sink::{ChannelSink, SearchSink};
pub use task::{
    CloseSearchTask, FrameOutcome, PageFrame, RangeSearchTask, SearchTask, TaskHandle, TaskKind,
    TaskState, PROGRESS_PERIOD,
};
