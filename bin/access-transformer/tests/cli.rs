use access_transformer::jvm::class_file::{ClassFile, ConstantsPool, Field, Version};
use access_transformer::jvm::{ClassAccessFlags, FieldAccessFlags};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Fresh, empty scratch directory for one test
fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "access-transformer-{}-{}",
        name,
        std::process::id()
    ));
    if path.exists() {
        fs::remove_dir_all(&path).unwrap();
    }
    fs::create_dir_all(&path).unwrap();
    path
}

/// Class with one private `int` field `a`
fn write_class(path: &Path, class_name: &str) {
    let mut pool = ConstantsPool::new();
    let this_class = pool.get_class(class_name).unwrap();
    let super_class = pool.get_class("java/lang/Object").unwrap();
    let a = pool.get_utf8("a").unwrap();
    let int = pool.get_utf8("I").unwrap();
    let class = ClassFile {
        version: Version::JAVA17,
        constants: pool.into_offset_vec(),
        access_flags: ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER,
        this_class,
        super_class,
        interfaces: vec![],
        fields: vec![Field {
            access_flags: FieldAccessFlags::PRIVATE,
            name_index: a,
            descriptor_index: int,
            attributes: vec![],
        }],
        methods: vec![],
        attributes: vec![],
    };
    class.save_to_path(path, true).unwrap();
}

fn field_flags(path: &Path) -> FieldAccessFlags {
    let class = ClassFile::parse(&fs::read(path).unwrap()).unwrap();
    class.fields[0].access_flags
}

fn run(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_access-transformer"))
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn transforms_directory_into_output() {
    let dir = temp_path("directory");
    let input = dir.join("classes");
    let output = dir.join("out");
    write_class(&input.join("pkg/TestClass1.class"), "pkg/TestClass1");
    write_class(&input.join("pkg/Other.class"), "pkg/Other");
    let rules = dir.join("rules.cfg");
    fs::write(
        &rules,
        "# make it visible\npublic+f pkg.TestClass1 a\n\npublic pkg.Missing *\n",
    )
    .unwrap();

    let result = run(&[
        "--rules".as_ref(),
        rules.as_os_str(),
        "--output".as_ref(),
        output.as_os_str(),
        input.as_os_str(),
    ]);
    assert!(result.status.success(), "{:?}", result);

    assert_eq!(
        field_flags(&output.join("pkg/TestClass1.class")),
        FieldAccessFlags::PUBLIC | FieldAccessFlags::FINAL
    );
    assert_eq!(
        field_flags(&output.join("pkg/Other.class")),
        FieldAccessFlags::PRIVATE
    );

    // Input is left alone
    assert_eq!(
        field_flags(&input.join("pkg/TestClass1.class")),
        FieldAccessFlags::PRIVATE
    );

    // Directives for classes that were never seen are reported, but do not fail the run
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(
        stderr.contains("No class found for directives on 'pkg/Missing'"),
        "{}",
        stderr
    );
    assert!(!stderr.contains("pkg/TestClass1"), "{}", stderr);
}

#[test]
fn later_rule_files_win_and_files_are_rewritten_in_place() {
    let dir = temp_path("in-place");
    let class = dir.join("TestClass1.class");
    write_class(&class, "pkg/TestClass1");
    let first = dir.join("first.cfg");
    let second = dir.join("second.cfg");
    fs::write(&first, "public pkg.TestClass1 a\n").unwrap();
    fs::write(&second, "protected pkg.TestClass1 a\n").unwrap();

    let result = run(&[
        "-r".as_ref(),
        first.as_os_str(),
        "-r".as_ref(),
        second.as_os_str(),
        class.as_os_str(),
    ]);
    assert!(result.status.success(), "{:?}", result);
    assert_eq!(field_flags(&class), FieldAccessFlags::PROTECTED);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = temp_path("dry-run");
    let class = dir.join("TestClass1.class");
    write_class(&class, "pkg/TestClass1");
    let before = fs::read(&class).unwrap();
    let rules = dir.join("rules.cfg");
    fs::write(&rules, "public pkg.TestClass1 a\n").unwrap();

    let result = run(&[
        "--dry-run".as_ref(),
        "--rules".as_ref(),
        rules.as_os_str(),
        class.as_os_str(),
    ]);
    assert!(result.status.success(), "{:?}", result);
    assert_eq!(fs::read(&class).unwrap(), before);
}

#[test]
fn bad_rules_fail_the_run() {
    let dir = temp_path("bad-rules");
    let class = dir.join("TestClass1.class");
    write_class(&class, "pkg/TestClass1");
    let before = fs::read(&class).unwrap();
    let rules = dir.join("rules.cfg");
    fs::write(&rules, "public pkg.TestClass1 a\npublic+q pkg.TestClass1 a\n").unwrap();

    let result = run(&["--rules".as_ref(), rules.as_os_str(), class.as_os_str()]);
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("rules.cfg:2"), "{}", stderr);
    assert_eq!(fs::read(&class).unwrap(), before);
}
