//! Dump loading tests against the on-disk fixtures.

#[cfg(test)]
mod tests {
    use ged::resolve::find_usages;
    use ged::semantic::{DumpLoader, Loader, SelectionKind, TypeRef};
    use ged::Pattern;
    use std::path::PathBuf;

    fn loader() -> DumpLoader {
        DumpLoader::new(
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("tests")
                .join("fixtures"),
        )
    }

    #[test]
    fn test_directory_loads_every_dump() {
        let modules = loader().load(&["usepkg1".to_string()]).expect("load usepkg1");
        let mut paths: Vec<&str> = modules.iter().map(|m| m.path.as_str()).collect();
        paths.sort();
        assert_eq!(paths, vec!["uut/usepkg1/typefield", "uut/usepkg1/typemethod"]);
    }

    #[test]
    fn test_dump_tables_survive_deserialization() {
        let modules = loader()
            .load(&["crosspkgs/crosspkgs.json".to_string()])
            .expect("load crosspkgs");
        let module = &modules[0];

        let pointer_selections = module
            .selections
            .values()
            .filter(|s| matches!(s.recv, TypeRef::Pointer(_)))
            .count();
        assert_eq!(pointer_selections, 2);
        assert!(module
            .selections
            .values()
            .all(|s| s.kind == SelectionKind::MethodVal));
        assert!(module.check_references().is_ok());
    }

    #[test]
    fn test_bare_identifier_across_loaded_modules() {
        let pattern = Pattern::parse("uut/pkg1:T1").unwrap();
        let matches = find_usages(&pattern, &loader(), &["usepkg1".to_string()]).expect("search");
        assert_eq!(
            matches.render(),
            "uut/pkg1 T1:\n\
             \ttestdata/usepkg1/typefield/typefield.go:9:12\n\
             \ttestdata/usepkg1/typemethod/typemethod.go:7:12\n\
             \ttestdata/usepkg1/typemethod/typemethod.go:8:13\n"
        );
    }

    #[test]
    fn test_type_errors_fail_the_load() {
        let err = loader()
            .load(&["usepkg1".to_string(), "broken".to_string()])
            .unwrap_err();
        assert_eq!(err.kind(), "Load");
        assert!(err.to_string().contains("uut/broken"));
    }
}
