//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 样例路由表 e2e 测试
//! - 解析性质测试 (注册顺序无关、最深处理器优先)
//! - 配置文件 -> 分发树 全链路

#[cfg(test)]
mod contract_tests {
    use contracts::{ResolutionKind, RouteTable, TableVersion};

    #[test]
    fn test_contracts_compile() {
        // 验证 contracts crate 可编译
        let _ = TableVersion::V1;
    }

    #[test]
    fn test_route_table_json_snapshot() {
        let table: RouteTable = serde_json_table(
            r#"{ "routes": [ { "path": "/a/dead" }, { "path": "/", "handler": "handler_default" } ] }"#,
        );
        assert_eq!(table.version, TableVersion::V1);
        assert!(table.handlers.is_empty());
        assert_eq!(table.bound_route_count(), 1);
        assert_eq!(table.referenced_handlers(), vec!["handler_default"]);
    }

    #[test]
    fn test_resolution_kind_labels() {
        assert_eq!(ResolutionKind::Exact.as_str(), "exact");
        assert_eq!(ResolutionKind::Ancestor.as_str(), "ancestor");
        assert_eq!(ResolutionKind::Miss.as_str(), "miss");
    }

    fn serde_json_table(content: &str) -> RouteTable {
        config_loader::ConfigLoader::load_from_str(content, config_loader::ConfigFormat::Json)
            .unwrap()
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;

    use dispatch_tree::{DispatchTree, FnHandler, ResolutionKind, SharedHandler};

    type Calls = Vec<(String, String)>;

    fn recording(name: &'static str) -> SharedHandler<Calls> {
        Arc::new(FnHandler::new(name, move |path, calls: &mut Calls| {
            calls.push((name.to_string(), path.to_string()));
            0
        }))
    }

    /// 样例路由表，`/` 最后注册
    fn sample_routes() -> Vec<(&'static str, Option<SharedHandler<Calls>>)> {
        vec![
            ("/a", Some(recording("handler_a"))),
            ("/a/aa", Some(recording("handler_aa"))),
            ("/a/dead", None),
            ("/a/ab", Some(recording("handler_ab"))),
            ("/a/ab/aba", Some(recording("handler_aba"))),
            ("/b", Some(recording("handler_b"))),
            ("/b/interface", Some(recording("handler_binterface"))),
            ("/b/interface=", Some(recording("handler_binterface_key"))),
            ("/", Some(recording("handler_default"))),
        ]
    }

    const SAMPLE_QUERIES: [(&str, &str, ResolutionKind); 10] = [
        ("/", "handler_default", ResolutionKind::Exact),
        ("/a", "handler_a", ResolutionKind::Exact),
        ("/a/dead", "handler_a", ResolutionKind::Ancestor),
        ("/a/aa", "handler_aa", ResolutionKind::Exact),
        ("/a/ab", "handler_ab", ResolutionKind::Exact),
        ("/a/ab/aba", "handler_aba", ResolutionKind::Exact),
        ("/a/aa/xxx", "handler_aa", ResolutionKind::Ancestor),
        ("/b", "handler_b", ResolutionKind::Exact),
        ("/b/interface", "handler_binterface", ResolutionKind::Exact),
        (
            "/b/interface=eth0",
            "handler_binterface_key",
            ResolutionKind::Exact,
        ),
    ];

    fn sample_tree() -> DispatchTree<Calls> {
        let mut tree = DispatchTree::new();
        let report = tree.register_all(sample_routes());
        assert!(report.is_clean(), "unexpected report: {report:?}");
        tree
    }

    #[test]
    fn test_e2e_sample_table_resolution() {
        let tree = sample_tree();

        for (path, expected, kind) in SAMPLE_QUERIES {
            let resolution = tree.resolve_match(path);
            assert_eq!(
                resolution.handler_id().map(|id| id.as_str()),
                Some(expected),
                "path {path}"
            );
            assert_eq!(resolution.kind, kind, "path {path}");
        }
    }

    #[test]
    fn test_e2e_sample_table_invocation() {
        let tree = sample_tree();
        let mut calls = Calls::new();

        for (path, _, _) in SAMPLE_QUERIES {
            assert_eq!(tree.invoke(path, &mut calls).unwrap(), 0);
        }

        assert_eq!(calls.len(), SAMPLE_QUERIES.len());
        for ((name, path), (query, expected, _)) in calls.iter().zip(SAMPLE_QUERIES) {
            assert_eq!(name, expected);
            // 处理器收到原始路径，包括键值
            assert_eq!(path, query);
        }
    }

    #[test]
    fn test_e2e_sample_tree_shape() {
        let tree = sample_tree();

        // "/" + a, aa, dead, ab, aba + b, interface, interface=
        assert_eq!(tree.len(), 9);
        assert_eq!(tree.handler_count(), 8);
        assert_eq!(tree.top_level().len(), 1);

        let dump = tree.to_string();
        let expected = "\
[/] handler_default
    [a] handler_a
        [aa] handler_aa
        [dead] -
        [ab] handler_ab
            [aba] handler_aba
    [b] handler_b
        [interface] handler_binterface
        [interface=] handler_binterface_key
";
        assert_eq!(dump, expected);
    }

    #[test]
    fn test_e2e_node_paths_round_trip() {
        let tree = sample_tree();
        for (_, id) in tree.walk() {
            let path = tree.node_path(id);
            assert_eq!(tree.find_path(&path), Some(id), "path {path}");
        }
    }
}

#[cfg(test)]
mod property_tests {
    use std::sync::Arc;

    use dispatch_tree::{DispatchTree, FnHandler, SharedHandler};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn handler(name: &str) -> SharedHandler {
        Arc::new(FnHandler::new(name, |_, _: &mut ()| 0))
    }

    fn routes() -> Vec<(&'static str, Option<SharedHandler>)> {
        vec![
            ("/", Some(handler("Hroot"))),
            ("/a", Some(handler("H1"))),
            ("/a/b", None),
            ("/a/b/c/d", Some(handler("Hd"))),
            ("/x/y", Some(handler("Hxy"))),
            ("/x/list=", Some(handler("Hkey"))),
            ("/x/list", Some(handler("Hlist"))),
        ]
    }

    const QUERIES: [&str; 12] = [
        "/",
        "/a",
        "/a/b",
        "/a/b/c",
        "/a/b/c/d",
        "/a/b/c/d/e/f",
        "/x",
        "/x/y/z",
        "/x/list",
        "/x/list=k1",
        "/x/list=k1/leaf",
        "/q/r",
    ];

    fn resolve_all(tree: &DispatchTree) -> Vec<Option<String>> {
        QUERIES
            .iter()
            .map(|q| tree.resolve(q).map(|h| h.id().to_string()))
            .collect()
    }

    #[test]
    fn test_registration_order_does_not_change_resolution() {
        let mut baseline = DispatchTree::new();
        baseline.register_all(routes());
        let expected = resolve_all(&baseline);

        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..32 {
            let mut shuffled = routes();
            shuffled.shuffle(&mut rng);

            let mut tree = DispatchTree::new();
            let report = tree.register_all(shuffled);
            assert!(report.is_clean());
            assert_eq!(tree.len(), baseline.len());
            assert_eq!(resolve_all(&tree), expected);
        }
    }

    #[test]
    fn test_expected_resolutions() {
        let mut tree = DispatchTree::new();
        tree.register_all(routes());

        let got = resolve_all(&tree);
        let expected = [
            "Hroot", "H1", "H1", "H1", "Hd", "Hd", "Hroot", "Hxy", "Hlist", "Hkey", "Hkey",
            "Hroot",
        ];
        for ((query, got), expected) in QUERIES.iter().zip(&got).zip(expected) {
            assert_eq!(got.as_deref(), Some(expected), "query {query}");
        }
    }

    #[test]
    fn test_resolved_handler_is_deepest_on_path() {
        let mut tree = DispatchTree::new();
        tree.register_all(routes());

        for query in QUERIES {
            let resolution = tree.resolve_match(query);
            let Some(node) = resolution.node else {
                continue;
            };
            // 命中节点的深度不超过已匹配的段数
            assert!(tree.depth(node) < resolution.matched, "query {query}");
            assert!(tree.node(node).is_some_and(|n| n.has_handler()));
        }
    }

    #[test]
    fn test_registration_is_idempotent_for_same_handler() {
        let shared = handler("H1");
        let mut tree = DispatchTree::new();
        tree.register("/a/b", Some(shared.clone())).unwrap();
        let nodes = tree.len();

        for _ in 0..5 {
            tree.register("/a/b", Some(shared.clone())).unwrap();
        }
        assert_eq!(tree.len(), nodes);
        assert_eq!(tree.handler_count(), 1);
    }
}

#[cfg(test)]
mod config_tests {
    use std::io::Write;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::RouteTable;
    use dispatch_tree::{DispatchError, DispatchTree, HandlerRegistry};
    use observability::DispatchStatsAggregator;

    const SAMPLE_TABLE: &str = r#"
[handlers.handler_default]
description = "fallback for everything"

[[routes]]
path = "/a"
handler = "handler_a"

[[routes]]
path = "/a/dead"

[[routes]]
path = "/b/interface="
handler = "handler_binterface_key"

[[routes]]
path = "/"
handler = "handler_default"
"#;

    fn registry(table: &RouteTable) -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        for name in table.all_handler_names() {
            registry.insert_fn(name, |_, _: &mut ()| 0);
        }
        registry
    }

    #[test]
    fn test_table_file_to_tree() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(SAMPLE_TABLE.as_bytes()).unwrap();

        let table = ConfigLoader::load_from_path(file.path()).unwrap();
        let (tree, report) = DispatchTree::from_table(&table, &registry(&table)).unwrap();

        assert!(report.is_clean());
        assert_eq!(
            tree.resolve("/a/dead/x").map(|h| h.id().as_str()),
            Some("handler_a")
        );
        assert_eq!(
            tree.resolve("/b/interface=eth0").map(|h| h.id().as_str()),
            Some("handler_binterface_key")
        );
        assert_eq!(
            tree.resolve("/b").map(|h| h.id().as_str()),
            Some("handler_default")
        );
    }

    #[test]
    fn test_json_copy_builds_same_tree() {
        let table = ConfigLoader::load_from_str(SAMPLE_TABLE, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&table).unwrap();

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let reloaded = ConfigLoader::load_from_path(file.path()).unwrap();

        let (a, _) = DispatchTree::from_table(&table, &registry(&table)).unwrap();
        let (b, _) = DispatchTree::from_table(&reloaded, &registry(&reloaded)).unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_empty_route_is_rejected_alone() {
        let content = r#"
[[routes]]
path = "/a"
handler = "handler_a"

[[routes]]
path = ""
handler = "handler_b"
"#;
        let table = ConfigLoader::load_from_str(content, ConfigFormat::Toml).unwrap();
        let warnings = config_loader::validator::collect_warnings(&table);
        assert!(warnings.iter().any(|w| w.contains("empty path")));

        let (tree, report) = DispatchTree::from_table(&table, &registry(&table)).unwrap();
        assert_eq!(report.registered, 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].path, "");
        assert_eq!(
            tree.resolve("/a/x").map(|h| h.id().as_str()),
            Some("handler_a")
        );
    }

    #[test]
    fn test_unknown_handler_is_reported() {
        let table = ConfigLoader::load_from_str(SAMPLE_TABLE, ConfigFormat::Toml).unwrap();
        let empty: HandlerRegistry = HandlerRegistry::new();

        let err = DispatchTree::from_table(&table, &empty).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownHandler { .. }));
    }

    #[test]
    fn test_stats_over_sample_queries() {
        let table = ConfigLoader::load_from_str(SAMPLE_TABLE, ConfigFormat::Toml).unwrap();
        let (tree, _) = DispatchTree::from_table(&table, &registry(&table)).unwrap();

        let mut stats = DispatchStatsAggregator::new();
        for query in ["/a", "/a/dead", "/b/interface=eth0", "/zzz", "relative"] {
            let r = tree.resolve_match(query);
            stats.update(r.kind, r.handler_id().map(|id| id.as_str()), r.matched);
        }

        let summary = stats.summary();
        assert_eq!(summary.total_queries, 5);
        assert_eq!(summary.exact_hits, 2);
        assert_eq!(summary.ancestor_hits, 2);
        assert_eq!(summary.misses, 1);
        assert_eq!(summary.handler_hits.get("handler_default"), Some(&1));
    }
}
