//! End-to-end tests of the generation driver over a directory tree

use std::fs;
use std::path::Path;

use rosbridge_codegen::Generator;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_tree(root: &Path) {
    write(
        &root.join("geometry_msgs/msg/Vector3.msg"),
        "float64 x\nfloat64 y\nfloat64 z\n",
    );
    write(
        &root.join("my_msgs/msg/Status.msg"),
        "uint8 OK = 0\nuint8 code\nstring detail\n",
    );
    write(
        &root.join("my_srvs/srv/AddTwoInts.srv"),
        "int64 a\nint64 b\n---\nint64 sum\n",
    );
    write(
        &root.join("my_actions/action/Fibonacci.action"),
        "int32 order\n---\nint32[] sequence\n---\nint32[] partial_sequence\n",
    );
}

#[test]
fn generates_full_tree() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    sample_tree(input.path());

    let written = Generator::new()
        .input_dir(input.path())
        .output_dir(output.path())
        .header("// Auto-generated - do not edit")
        .generate()
        .unwrap();
    assert!(!written.is_empty());

    // Message: data struct plus topic wrapper.
    let vector3 = output.path().join("geometry_msgs/vector3.rs");
    let vector3_topic = output.path().join("geometry_msgs/vector3_topic.rs");
    assert!(vector3.is_file());
    assert!(vector3_topic.is_file());
    let content = fs::read_to_string(&vector3).unwrap();
    assert!(content.starts_with("// Auto-generated - do not edit"));
    assert!(content.contains("pub struct Vector3"));
    assert!(content.contains("impl rosbridge::Message for Vector3"));

    // Service: request, response, wrapper.
    for name in ["add_two_ints_request", "add_two_ints_response", "add_two_ints"] {
        assert!(output.path().join(format!("my_srvs/{name}.rs")).is_file());
    }

    // Action: goal, result, feedback.
    for name in ["fibonacci_goal", "fibonacci_result", "fibonacci_feedback"] {
        assert!(output.path().join(format!("my_actions/{name}.rs")).is_file());
    }
    let goal = fs::read_to_string(output.path().join("my_actions/fibonacci_goal.rs")).unwrap();
    assert!(goal.contains("goal_id"));

    // Module indexes at every level.
    let root_mod = fs::read_to_string(output.path().join("mod.rs")).unwrap();
    for package in ["geometry_msgs", "my_msgs", "my_srvs", "my_actions"] {
        assert!(root_mod.contains(&format!("pub mod {package} {{")));
        assert!(output.path().join(package).join("mod.rs").is_file());
    }
}

#[test]
fn module_prefix_shifts_output_tree() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(
        &input.path().join("my_msgs/msg/Ping.msg"),
        "uint32 seq\n",
    );

    Generator::new()
        .input_dir(input.path())
        .output_dir(output.path())
        .module_prefix("generated")
        .generate()
        .unwrap();

    assert!(output.path().join("generated/my_msgs/ping.rs").is_file());
    let root_mod = fs::read_to_string(output.path().join("mod.rs")).unwrap();
    assert!(root_mod.contains("pub mod generated {"));
}

#[test]
fn broken_file_is_skipped_without_partial_output() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(&input.path().join("my_msgs/msg/Good.msg"), "uint32 seq\n");
    // Group count is wrong for a message; the whole file must be skipped.
    write(
        &input.path().join("my_msgs/msg/Broken.msg"),
        "uint32 seq\n---\nuint32 other\n",
    );

    Generator::new()
        .input_dir(input.path())
        .output_dir(output.path())
        .generate()
        .unwrap();

    assert!(output.path().join("my_msgs/good.rs").is_file());
    assert!(!output.path().join("my_msgs/broken.rs").exists());
    assert!(!output.path().join("my_msgs/broken_topic.rs").exists());
}

#[test]
fn single_include_uses_containing_package() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let file = input.path().join("my_msgs/msg/Imu.msg");
    write(&file, "float64[9] orientation_covariance\n");

    Generator::new()
        .include(&file)
        .output_dir(output.path())
        .generate()
        .unwrap();

    let imu = fs::read_to_string(output.path().join("my_msgs/imu.rs")).unwrap();
    assert!(imu.contains("pub orientation_covariance: Vec<f64>"));
}

#[test]
fn missing_include_fails() {
    let output = tempfile::tempdir().unwrap();
    let err = Generator::new()
        .include("/nonexistent/Thing.msg")
        .output_dir(output.path())
        .generate()
        .unwrap_err();
    assert!(matches!(
        err,
        rosbridge_codegen::GeneratorError::InputFileNotFound { .. }
    ));
}
