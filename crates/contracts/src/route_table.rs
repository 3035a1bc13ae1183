//! RouteTable - Config Loader 输出
//!
//! 描述完整的注册表：路径到处理器名称的绑定，以及处理器声明。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::HandlerStatus;

/// 配置版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TableVersion {
    #[default]
    V1,
}

/// 完整的路由注册表
///
/// `routes` 的顺序就是注册顺序；顺序只影响诊断（替换告警），不影响解析结果。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteTable {
    /// 配置版本
    #[serde(default)]
    pub version: TableVersion,

    /// 处理器声明 (名称 -> 参数)，可选
    #[serde(default)]
    pub handlers: BTreeMap<String, HandlerSpec>,

    /// 路由列表
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

impl RouteTable {
    /// Handler names referenced by at least one route, in first-use order
    pub fn referenced_handlers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.routes.iter().filter_map(|r| r.handler.as_deref()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Declared handlers followed by undeclared referenced ones
    pub fn all_handler_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        for name in self.referenced_handlers() {
            if !self.handlers.contains_key(name) {
                names.push(name);
            }
        }
        names
    }

    /// Number of routes that bind a handler
    pub fn bound_route_count(&self) -> usize {
        self.routes.iter().filter(|r| r.handler.is_some()).count()
    }
}

/// 单条路由：路径 + 可选处理器
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    /// 注册路径 (必须以 `/` 开头；键控列表写成 `name=`)
    pub path: String,

    /// 处理器名称；缺省表示仅创建结构节点
    #[serde(default)]
    pub handler: Option<String>,
}

impl RouteSpec {
    /// Route binding a handler
    pub fn new(path: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            handler: Some(handler.into()),
        }
    }

    /// Structural-only route (no handler of its own)
    pub fn structural(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            handler: None,
        }
    }
}

/// 处理器声明
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerSpec {
    /// 处理器返回的状态码
    #[serde(default)]
    pub status: HandlerStatus,

    /// 描述 (可选)
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_TOML: &str = r#"
[handlers.handler_a]
description = "top of /a"

[handlers.handler_fail]
status = 2

[[routes]]
path = "/a"
handler = "handler_a"

[[routes]]
path = "/a/dead"

[[routes]]
path = "/b"
handler = "handler_b"

[[routes]]
path = "/c"
handler = "handler_a"
"#;

    #[test]
    fn test_deserialize_toml_defaults() {
        let table: RouteTable = toml::from_str(TABLE_TOML).unwrap();

        assert_eq!(table.version, TableVersion::V1);
        assert_eq!(table.routes.len(), 4);
        assert_eq!(table.routes[1], RouteSpec::structural("/a/dead"));
        assert_eq!(table.handlers["handler_a"].status, 0);
        assert_eq!(table.handlers["handler_fail"].status, 2);
    }

    #[test]
    fn test_referenced_handlers_deduplicated() {
        let table: RouteTable = toml::from_str(TABLE_TOML).unwrap();
        assert_eq!(table.referenced_handlers(), vec!["handler_a", "handler_b"]);
        assert_eq!(table.bound_route_count(), 3);
    }

    #[test]
    fn test_all_handler_names_declared_first() {
        let table: RouteTable = toml::from_str(TABLE_TOML).unwrap();
        assert_eq!(
            table.all_handler_names(),
            vec!["handler_a", "handler_fail", "handler_b"]
        );
    }

    #[test]
    fn test_empty_table() {
        let table: RouteTable = serde_json::from_str("{}").unwrap();
        assert!(table.routes.is_empty());
        assert!(table.handlers.is_empty());
    }
}
