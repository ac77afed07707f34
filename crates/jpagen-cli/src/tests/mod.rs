//! Runner tests with an injected configuration loader and captured streams.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use jpagen_config::Config;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;

const BASE_ENTITY: &str = "package com.example.common;\n\n@MappedSuperclass\npublic abstract class BaseEntity {\n    @Id\n    private Long id;\n}\n";

const ORDER: &str = "package com.example.orders;\n\n@Entity\npublic class Order extends BaseEntity {\n    private String reference;\n}\n";

struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

struct Outcome {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

struct Project {
    dir: TempDir,
}

impl Project {
    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, contents).expect("write");
        path
    }

    fn run(&self, args: &[&str]) -> Outcome {
        let root = Utf8PathBuf::from_path_buf(self.root().to_path_buf()).expect("utf-8 root");
        let loader = StaticConfigLoader {
            config: Config {
                project_root: Some(root),
                ..Config::default()
            },
        };
        let argv = std::iter::once("jpagen")
            .chain(args.iter().copied())
            .map(OsString::from);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut io = IoStreams::new(&mut stdout, &mut stderr);
        let exit = run_with_loader(argv, &mut io, &loader);
        Outcome {
            exit,
            stdout: String::from_utf8(stdout).expect("stdout utf-8"),
            stderr: String::from_utf8(stderr).expect("stderr utf-8"),
        }
    }
}

#[fixture]
fn project() -> Project {
    let project = Project {
        dir: TempDir::new().expect("temp dir"),
    };
    project.write(
        "src/main/java/com/example/common/BaseEntity.java",
        BASE_ENTITY,
    );
    project.write("src/main/java/com/example/orders/Order.java", ORDER);
    project
}

fn order_path(project: &Project) -> String {
    project
        .path("src/main/java/com/example/orders/Order.java")
        .to_string_lossy()
        .into_owned()
}

#[rstest]
fn repository_is_written_next_to_the_entity(project: Project) {
    let outcome = project.run(&["repository", &order_path(&project)]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    let target = project.path("src/main/java/com/example/orders/OrderRepository.java");
    assert!(outcome.stdout.contains("OrderRepository.java"));
    assert_eq!(
        fs::read_to_string(target).expect("read repository"),
        concat!(
            "package com.example.orders;\n",
            "\n",
            "import org.springframework.data.jpa.repository.JpaRepository;\n",
            "\n",
            "import java.lang.Long;\n",
            "\n",
            "public interface OrderRepository extends JpaRepository<Order, Long> {}\n",
        )
    );
}

#[rstest]
fn existing_repositories_are_kept(project: Project) {
    let existing = project.write(
        "src/main/java/com/example/orders/OrderRepository.java",
        "// hand written\n",
    );

    let outcome = project.run(&["repository", &order_path(&project)]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.starts_with("jpagen: error: "));
    assert!(outcome.stderr.contains("already exists"));
    assert_eq!(fs::read_to_string(existing).expect("read"), "// hand written\n");
}

#[rstest]
fn printed_repositories_leave_the_tree_alone(project: Project) {
    let outcome = project.run(&["repository", "--print", &order_path(&project)]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert!(
        outcome
            .stdout
            .ends_with("public interface OrderRepository extends JpaRepository<Order, Long> {}\n")
    );
    assert!(
        !project
            .path("src/main/java/com/example/orders/OrderRepository.java")
            .exists()
    );
}

#[rstest]
fn classification_failures_are_reported(project: Project) {
    let widget = project.write(
        "src/main/java/com/example/orders/Widget.java",
        "public class Widget {}\n",
    );

    let outcome = project.run(&["repository", &widget.to_string_lossy()]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert_eq!(
        outcome.stderr,
        "jpagen: error: class 'Widget' is not annotated with @Entity\n"
    );
}

#[rstest]
fn identifier_fields_are_inserted_into_the_class(project: Project) {
    let file = project.write(
        "src/main/java/com/example/orders/Customer.java",
        "@Entity\npublic class Customer {\n}\n",
    );

    let outcome = project.run(&[
        "id-field",
        &file.to_string_lossy(),
        "--type",
        "Long",
        "--name",
        "id",
        "--generation",
        "identity",
    ]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(
        fs::read_to_string(file).expect("read"),
        concat!(
            "@Entity\n",
            "public class Customer {\n",
            "    @Id\n",
            "    @GeneratedValue(strategy = GenerationType.IDENTITY)\n",
            "    @Column(name = \"id\", nullable = false)\n",
            "    private Long id;\n",
            "}\n",
        )
    );
}

#[rstest]
fn enum_fields_can_be_printed(project: Project) {
    let outcome = project.run(&[
        "enum-field",
        &order_path(&project),
        "--type",
        "Status",
        "--name",
        "status",
        "--length",
        "32",
        "--nullable",
        "--print",
    ]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(
        outcome.stdout,
        concat!(
            "    @Enumerated(EnumType.STRING)\n",
            "    @Column(name = \"status\", length = 32)\n",
            "    private Status status;\n",
        )
    );
    assert_eq!(fs::read_to_string(order_path(&project)).expect("read"), ORDER);
}

#[rstest]
fn unknown_field_types_are_rejected(project: Project) {
    let outcome = project.run(&[
        "basic-field",
        &order_path(&project),
        "--type",
        "Strin",
        "--name",
        "title",
    ]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert_eq!(
        outcome.stderr,
        "jpagen: error: 'Strin' is not a valid type for basic fields\n"
    );
    assert_eq!(fs::read_to_string(order_path(&project)).expect("read"), ORDER);
}

#[rstest]
fn identifier_fields_need_a_key_type(project: Project) {
    let file = project.write(
        "src/main/java/com/example/orders/Customer.java",
        "@Entity\npublic class Customer {\n}\n",
    );

    let outcome = project.run(&[
        "id-field",
        &file.to_string_lossy(),
        "--type",
        "Blob",
        "--name",
        "id",
    ]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert_eq!(
        outcome.stderr,
        "jpagen: error: 'Blob' is not a valid type for identifier fields\n"
    );
    assert_eq!(
        fs::read_to_string(file).expect("read"),
        "@Entity\npublic class Customer {\n}\n"
    );
}

#[rstest]
#[case::missing_subcommand(&[])]
#[case::missing_type(&["basic-field", "Order.java", "--name", "title"])]
#[case::unknown_generation(&[
    "id-field", "Order.java", "--type", "Long", "--name", "id", "--generation", "random",
])]
fn usage_errors_exit_with_status_two(project: Project, #[case] args: &[&str]) {
    let outcome = project.run(args);

    assert_eq!(outcome.exit, ExitCode::from(2));
    assert!(!outcome.stderr.is_empty());
}

#[rstest]
fn help_is_written_to_stdout(project: Project) {
    let outcome = project.run(&["--help"]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("repository"));
    assert!(outcome.stdout.contains("enum-field"));
}
