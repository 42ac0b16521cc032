//! # 产品、客户、发货单 REST 服务
//!
//! 三个集合各保存为一个 JSON 文件，每次请求都重新读取：
//! - `app`：处理器、业务服务、发货单金额计算与客户名称关联
//! - `core`：统一错误处理、请求日志中间件
//! - `infrastructure`：记录存储、ID 生成、实体仓储、日志初始化
//! - `config`：TOML 配置

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{build_router, AppState};
pub use config::AppConfig;
