//! 配置校验模块
//!
//! 校验规则 (致命)：
//! - 处理器名称非空，且不含空白字符 (路由引用与声明两处)
//!
//! 告警 (非致命，见 [`collect_warnings`])：
//! - 路径为空或不以 `/` 开头 (注册时会被拒绝，其余路由照常注册)
//! - 同一节点先后绑定了不同处理器 (后者覆盖前者)
//! - 声明了但未被任何路由引用的处理器
//! - 没有根 (`/`) 默认处理器
//!
//! 路径语法本身不做校验：坏路径只影响它自己那一条注册。

use std::collections::HashMap;

use contracts::{ContractError, RouteTable};

/// 路径分隔符
const SEPARATOR: char = '/';

/// 校验 RouteTable 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(table: &RouteTable) -> Result<(), ContractError> {
    validate_route_handlers(table)?;
    validate_declared_handlers(table)?;
    Ok(())
}

/// 收集非致命告警，按出现顺序
pub fn collect_warnings(table: &RouteTable) -> Vec<String> {
    let mut warnings = Vec::new();
    warn_unrooted_paths(table, &mut warnings);
    warn_rebound_paths(table, &mut warnings);
    warn_unused_handlers(table, &mut warnings);
    warn_missing_default(table, &mut warnings);
    warnings
}

/// 校验路由引用的处理器名称
fn validate_route_handlers(table: &RouteTable) -> Result<(), ContractError> {
    for (idx, route) in table.routes.iter().enumerate() {
        if let Some(name) = route.handler.as_deref() {
            check_handler_name(name, || format!("routes[{idx}].handler"))?;
        }
    }
    Ok(())
}

/// 校验声明的处理器名称
fn validate_declared_handlers(table: &RouteTable) -> Result<(), ContractError> {
    for name in table.handlers.keys() {
        check_handler_name(name, || format!("handlers[{name:?}]"))?;
    }
    Ok(())
}

fn check_handler_name(name: &str, field: impl Fn() -> String) -> Result<(), ContractError> {
    if name.is_empty() {
        return Err(ContractError::config_validation(
            field(),
            "handler name cannot be empty",
        ));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ContractError::config_validation(
            field(),
            format!("handler name must not contain whitespace, got {name:?}"),
        ));
    }
    Ok(())
}

/// 路径落到的节点：根之后的非空段
///
/// `/a`、`/a/`、`//a` 是同一个节点；非根路径返回 `None`。
fn node_key(path: &str) -> Option<Vec<&str>> {
    let rest = path.strip_prefix(SEPARATOR)?;
    Some(rest.split(SEPARATOR).filter(|s| !s.is_empty()).collect())
}

/// 路径为空或不以 `/` 开头
fn warn_unrooted_paths(table: &RouteTable, warnings: &mut Vec<String>) {
    for (idx, route) in table.routes.iter().enumerate() {
        if route.path.is_empty() {
            warnings.push(format!("routes[{idx}]: empty path, it will be rejected"));
        } else if !route.path.starts_with(SEPARATOR) {
            warnings.push(format!(
                "routes[{idx}]: path '{}' does not start with '/', it will be rejected",
                route.path
            ));
        }
    }
}

/// 同一节点先后绑定不同处理器
fn warn_rebound_paths(table: &RouteTable, warnings: &mut Vec<String>) {
    let mut bound: HashMap<Vec<&str>, (&str, &str)> = HashMap::new();
    for (idx, route) in table.routes.iter().enumerate() {
        let (Some(handler), Some(key)) = (route.handler.as_deref(), node_key(&route.path)) else {
            continue;
        };
        if let Some((previous_path, previous)) = bound.insert(key, (route.path.as_str(), handler)) {
            if previous != handler {
                warnings.push(format!(
                    "routes[{idx}]: path '{}' rebinds '{previous}' (from '{previous_path}') to '{handler}', the later one wins",
                    route.path
                ));
            }
        }
    }
}

/// 声明了但未被引用
fn warn_unused_handlers(table: &RouteTable, warnings: &mut Vec<String>) {
    let referenced = table.referenced_handlers();
    for name in table.handlers.keys() {
        if !referenced.contains(&name.as_str()) {
            warnings.push(format!("handler '{name}' is declared but never routed"));
        }
    }
}

/// 没有根默认处理器
fn warn_missing_default(table: &RouteTable, warnings: &mut Vec<String>) {
    let has_default = table
        .routes
        .iter()
        .any(|r| r.handler.is_some() && node_key(&r.path).is_some_and(|key| key.is_empty()));
    if !table.routes.is_empty() && !has_default {
        warnings.push("no default handler bound to '/', unmatched paths have no handler".to_string());
    }
}
