//! Integration tests for j1cache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Command isolated from the user's config file
    fn j1cache(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("j1cache");
        cmd.env("J1CACHE_CONFIG", temp.path().join("config.toml"))
            .env_remove("J1CACHE_DIR")
            .arg("--cache-dir")
            .arg(temp.path().join("cache"));
        cmd
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("j1cache")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("integration artifact cache"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("j1cache")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("j1cache"));
    }

    #[test]
    fn root_prints_cache_dir() {
        let temp = TempDir::new().unwrap();
        j1cache(&temp)
            .arg("root")
            .assert()
            .success()
            .stdout(predicate::str::contains("cache"));
    }

    #[test]
    fn root_defaults_to_working_directory() {
        let temp = TempDir::new().unwrap();
        cargo_bin_cmd!("j1cache")
            .env("J1CACHE_CONFIG", temp.path().join("config.toml"))
            .env_remove("J1CACHE_DIR")
            .current_dir(temp.path())
            .arg("root")
            .assert()
            .success()
            .stdout(predicate::str::ends_with(".j1-integration\n"));
    }

    #[test]
    fn write_link_walk() {
        let temp = TempDir::new().unwrap();

        j1cache(&temp)
            .args(["write", "graph/s/entities/1.json", "--value", r#"{"id":1}"#])
            .assert()
            .success();
        j1cache(&temp)
            .args(["link", "graph/s/entities/1.json", "index/entities/t/1.json"])
            .assert()
            .success();

        let written = std::fs::read_to_string(temp.path().join("cache/graph/s/entities/1.json"))
            .unwrap();
        assert_eq!(written, "{\n  \"id\": 1\n}");

        j1cache(&temp)
            .args(["walk", "index", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("index/entities/t/1.json"));

        j1cache(&temp)
            .args(["walk", "index", "--format", "json", "--data"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""bytes": 13"#));
    }

    #[test]
    fn relative_cache_dir_links_resolve() {
        let temp = TempDir::new().unwrap();
        let run = |args: &[&str]| {
            cargo_bin_cmd!("j1cache")
                .env("J1CACHE_CONFIG", temp.path().join("config.toml"))
                .env_remove("J1CACHE_DIR")
                .current_dir(temp.path())
                .args(["--cache-dir", "rel-cache"])
                .args(args)
                .assert()
                .success()
        };

        run(&["write", "graph/s/entities/1.json", "--value", r#"{"id":1}"#]);
        run(&["link", "graph/s/entities/1.json", "index/entities/t/1.json"]);

        let link = temp.path().join("rel-cache/index/entities/t/1.json");
        assert!(std::fs::read_link(&link).unwrap().is_absolute());
        assert_eq!(std::fs::read_to_string(&link).unwrap(), "{\n  \"id\": 1\n}");

        run(&["walk", "index", "--format", "json", "--data"])
            .stdout(predicate::str::contains(r#""bytes": 13"#));
    }

    #[test]
    fn write_keeps_key_order() {
        let temp = TempDir::new().unwrap();

        j1cache(&temp)
            .args(["write", "a.json", "--value", r#"{"b":1,"a":2}"#])
            .assert()
            .success();

        let written = std::fs::read_to_string(temp.path().join("cache/a.json")).unwrap();
        assert_eq!(written, "{\n  \"b\": 1,\n  \"a\": 2\n}");
    }

    #[test]
    fn write_from_stdin_raw() {
        let temp = TempDir::new().unwrap();

        j1cache(&temp)
            .args(["write", "notes/raw.txt", "--raw"])
            .write_stdin("plain text")
            .assert()
            .success();

        let written = std::fs::read_to_string(temp.path().join("cache/notes/raw.txt")).unwrap();
        assert_eq!(written, "plain text");
    }

    #[test]
    fn write_rejects_invalid_json() {
        let temp = TempDir::new().unwrap();
        j1cache(&temp)
            .args(["write", "a.json", "--value", "not json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--raw"));
    }

    #[test]
    fn link_twice_fails() {
        let temp = TempDir::new().unwrap();
        j1cache(&temp)
            .args(["link", "graph/a.json", "index/a.json"])
            .assert()
            .success();
        j1cache(&temp)
            .args(["link", "graph/a.json", "index/a.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to link"));
    }

    #[test]
    fn walk_missing_subtree_fails() {
        let temp = TempDir::new().unwrap();
        j1cache(&temp)
            .args(["walk", "graph"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to list directory"));
    }

    #[test]
    fn collect_unknown_resource_fails() {
        let temp = TempDir::new().unwrap();
        j1cache(&temp)
            .args(["collect", "pipelines"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown resource"));
    }

    #[test]
    fn collect_without_token_fails() {
        let temp = TempDir::new().unwrap();
        j1cache(&temp)
            .env_remove("GITLAB_TOKEN")
            .args(["collect", "users"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("GITLAB_TOKEN"));
    }

    #[test]
    fn config_path_and_init() {
        let temp = TempDir::new().unwrap();
        j1cache(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));

        j1cache(&temp).args(["config", "init"]).assert().success();

        j1cache(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[source]"));
    }
}

mod cache_tests {
    use j1cache::cache::{create_link, walk_directory, write_data, DEFAULT_CACHE_DIR_NAME};
    use serial_test::serial;
    use tempfile::TempDir;

    #[tokio::test]
    #[serial]
    async fn default_root_round_trip() {
        let original = std::env::current_dir().unwrap();
        let temp = TempDir::new().unwrap();
        std::env::set_current_dir(temp.path()).unwrap();

        let result = async {
            write_data(None, "graph/s/entities/a.json", &serde_json::json!({"a": 1})).await?;
            create_link(None, "graph/s/entities/a.json", "index/entities/t/a.json").await?;
            let mut seen = Vec::new();
            walk_directory(None, "index", |file| {
                seen.push(file.data);
                Ok(())
            })
            .await?;
            Ok::<_, j1cache::CacheError>(seen)
        }
        .await;
        std::env::set_current_dir(original).unwrap();

        assert_eq!(result.unwrap(), vec!["{\n  \"a\": 1\n}".to_string()]);
        assert!(temp
            .path()
            .join(DEFAULT_CACHE_DIR_NAME)
            .join("index/entities/t/a.json")
            .exists());
    }
}
