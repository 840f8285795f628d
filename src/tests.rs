use crate::{
    command::{build_all, render_config},
    compile::{AssetKind, Written},
    config::{Cli, Commands, Config, ConfigOpts, Opts},
    error::Error,
    run_in,
};
use camino::Utf8PathBuf;
use temp_dir::TempDir;

const PACKAGE: &str = r#"{
  "name": "craft-site",
  "partials": [
    { "name": "default" },
    {
      "name": "site",
      "css-manifest": "cms/web/assets/site/css/manifest.json",
      "css-base": "/assets/site/css/",
      "js-manifest": "cms/web/assets/site/js/manifest.json",
      "js-base": "/assets/site/js/",
      "css-partial": "cms/templates/_boilerplate/_partials/site/build-css.html",
      "js-partial": "cms/templates/_boilerplate/_partials/site/build-js.html"
    }
  ]
}"#;

struct Site {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Site {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        for dir in [
            "cms/web/assets/css",
            "cms/web/assets/js",
            "cms/web/assets/site/css",
            "cms/web/assets/site/js",
            "cms/templates/_boilerplate/_partials/site",
        ] {
            std::fs::create_dir_all(root.join(dir)).unwrap();
        }
        let site = Self { _tmp: tmp, root };
        site.write("package.json", PACKAGE);
        site
    }

    fn write(&self, rel: &str, content: &str) {
        std::fs::write(self.root.join(rel), content).unwrap();
    }

    fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root.join(rel)).unwrap()
    }

    fn manifests(&self) {
        self.write("cms/web/assets/css/manifest.json", r#"{"app.css": "app.9f8e7d.css"}"#);
        self.write("cms/web/assets/js/manifest.json", r#"{"main": "bundle.a1b2c3.js"}"#);
        self.write(
            "cms/web/assets/site/css/manifest.json",
            r#"{"site.css": "site.77aa11.css", "print.css": "print.88bb22.css"}"#,
        );
        self.write("cms/web/assets/site/js/manifest.json", r#"{"main": "bundle.d4e5f6.js"}"#);
    }

    fn cli(&self, command: Commands) -> Cli {
        Cli {
            manifest_path: Some(self.root.join("package.json")),
            command,
        }
    }

    fn config(&self) -> Config {
        let package = self.root.join("package.json");
        Config::load_with_env(Opts::default(), &self.root, Some(package.as_path()), Vec::new())
            .unwrap()
    }
}

#[test]
fn build_every_variant() {
    let site = Site::new();
    site.manifests();

    run_in(site.cli(Commands::Build(Opts::default())), &site.root).unwrap();

    assert_eq!(
        site.read("cms/templates/_boilerplate/_partials/build-css.html"),
        "<link rel=\"stylesheet\" href=\"/assets/css/app.9f8e7d.css\">\n"
    );
    assert_eq!(
        site.read("cms/templates/_boilerplate/_partials/build-js.html"),
        "<script defer src=\"/assets/js/bundle.a1b2c3.js\"></script>\n"
    );
    assert_eq!(
        site.read("cms/templates/_boilerplate/_partials/site/build-css.html"),
        "<link rel=\"stylesheet\" href=\"/assets/site/css/site.77aa11.css\">\n\
         <link rel=\"stylesheet\" href=\"/assets/site/css/print.88bb22.css\">\n"
    );
    assert_eq!(
        site.read("cms/templates/_boilerplate/_partials/site/build-js.html"),
        "<script defer src=\"/assets/site/js/bundle.d4e5f6.js\"></script>\n"
    );
}

#[test]
fn build_a_single_variant() {
    let site = Site::new();
    site.manifests();

    let opts = Opts {
        variant: Some("site".to_string()),
        ..Opts::default()
    };
    run_in(site.cli(Commands::Build(opts)), &site.root).unwrap();

    assert!(site
        .root
        .join("cms/templates/_boilerplate/_partials/site/build-js.html")
        .exists());
    assert!(!site
        .root
        .join("cms/templates/_boilerplate/_partials/build-js.html")
        .exists());
}

#[test]
fn second_build_is_byte_identical() {
    let site = Site::new();
    site.manifests();
    let config = site.config();

    let first = build_all(&config).unwrap();
    let css = site.read("cms/templates/_boilerplate/_partials/build-css.html");
    let js = site.read("cms/templates/_boilerplate/_partials/build-js.html");

    let second = build_all(&config).unwrap();
    assert_eq!(site.read("cms/templates/_boilerplate/_partials/build-css.html"), css);
    assert_eq!(site.read("cms/templates/_boilerplate/_partials/build-js.html"), js);

    assert!(first
        .iter()
        .flat_map(|r| &r.partials)
        .all(|p| p.written == Written::Updated));
    assert!(second
        .iter()
        .flat_map(|r| &r.partials)
        .all(|p| p.written == Written::Unchanged));
    assert_eq!(second[1].variant, "site");
    assert_eq!(second[1].partials[0].tags, 2);
}

#[test]
fn missing_js_manifest_leaves_both_partials_alone() {
    let site = Site::new();
    site.write("cms/web/assets/css/manifest.json", r#"{"app.css": "app.0c1d2e.css"}"#);
    site.write("cms/templates/_boilerplate/_partials/build-css.html", "old css\n");
    site.write("cms/templates/_boilerplate/_partials/build-js.html", "old js\n");

    let err = run_in(site.cli(Commands::Build(Opts::default())), &site.root).unwrap_err();

    let cause = err.downcast_ref::<Error>().unwrap();
    assert!(
        matches!(cause, Error::ManifestNotFound { kind: AssetKind::Js, .. }),
        "{err:?}"
    );
    assert!(format!("{err:?}").contains("variant \"default\""), "{err:?}");
    assert_eq!(
        site.read("cms/templates/_boilerplate/_partials/build-css.html"),
        "old css\n"
    );
    assert_eq!(
        site.read("cms/templates/_boilerplate/_partials/build-js.html"),
        "old js\n"
    );
}

#[test]
fn malformed_manifest_leaves_partials_alone() {
    let site = Site::new();
    site.manifests();
    site.write("cms/web/assets/css/manifest.json", "{ not json");
    site.write("cms/templates/_boilerplate/_partials/build-css.html", "old css\n");

    let err = run_in(site.cli(Commands::Build(Opts::default())), &site.root).unwrap_err();

    assert!(
        matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ManifestParse { kind: AssetKind::Css, .. })
        ),
        "{err:?}"
    );
    assert_eq!(
        site.read("cms/templates/_boilerplate/_partials/build-css.html"),
        "old css\n"
    );
    assert!(!site
        .root
        .join("cms/templates/_boilerplate/_partials/build-js.html")
        .exists());
}

#[test]
fn first_failing_variant_stops_the_build() {
    let site = Site::new();
    site.manifests();
    std::fs::remove_file(site.root.join("cms/web/assets/js/manifest.json")).unwrap();

    let err = run_in(site.cli(Commands::Build(Opts::default())), &site.root).unwrap_err();

    assert!(format!("{err:?}").contains("variant \"default\""), "{err:?}");
    assert!(!site
        .root
        .join("cms/templates/_boilerplate/_partials/site/build-css.html")
        .exists());
}

#[test]
fn missing_partial_directory() {
    let site = Site::new();
    site.manifests();
    std::fs::remove_dir_all(site.root.join("cms/templates/_boilerplate/_partials/site")).unwrap();

    let err = run_in(site.cli(Commands::Build(Opts::default())), &site.root).unwrap_err();

    assert!(
        matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Write { kind: AssetKind::Css, .. })
        ),
        "{err:?}"
    );
    assert!(format!("{err:?}").contains("variant \"site\""), "{err:?}");
    // the default variant ran first and is complete
    assert!(site
        .root
        .join("cms/templates/_boilerplate/_partials/build-js.html")
        .exists());
}

#[test]
fn printed_config_redacts_the_security_key() {
    let site = Site::new();
    let config = Config::load_with_env(
        Opts::default(),
        &site.root,
        None,
        vec![("SECURITY_KEY".to_string(), "s3cr3t".to_string())],
    )
    .unwrap();

    let printed = render_config(&config, false).unwrap();
    assert!(!printed.contains("s3cr3t"), "{printed}");
    assert!(printed.contains(r#""securityKey": "********""#), "{printed}");
    assert!(printed.contains(r#""base": "/assets/site/css/""#), "{printed}");
    assert!(printed.contains(r#""timezone": "Asia/Riyadh""#), "{printed}");

    let printed = render_config(&config, true).unwrap();
    assert!(printed.contains(r#""securityKey": "s3cr3t""#), "{printed}");
}

#[test]
fn config_command_runs() {
    let site = Site::new();
    run_in(site.cli(Commands::Config(ConfigOpts::default())), &site.root).unwrap();
}
