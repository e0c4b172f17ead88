//! lfsearch - 大文件分页搜索库
//!
//! 模块结构：
//! - kernel::services::ports: 数据契约（Position, SearchResult, SearchTaskOptions, PageProvider）
//! - kernel::services::adapters: 实现（匹配器, 搜索任务, 页面提供者, 配置）
//! - kernel::search: 搜索编排（SearchEngine, 结果列表, 状态文本）

pub mod kernel;
