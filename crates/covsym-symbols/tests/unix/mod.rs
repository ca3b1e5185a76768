mod utils;

use covsym_symbols::{DsoInfo, Error, SymbolRef, Symbolizer};
use test_log::test;

#[test(tokio::test)]
async fn resolves_pcs_in_dso_order() {
    let bin_dir = tempfile::tempdir().expect("tempdir");
    let scratch_dir = tempfile::tempdir().expect("tempdir");

    let tool = utils::fake_symbolizer(bin_dir.path(), "sym-echo", utils::ECHO_BODY);

    let pc_table = [0x1000_u64, 0x1010, 0x2000];
    let dso_table = [
        DsoInfo::new("/bin/target_a", 2),
        DsoInfo::new("/lib/lib_b.so", 1),
    ];

    let symbols = Symbolizer::new(&tool, scratch_dir.path())
        .symbolize(&pc_table, &dso_table)
        .await
        .expect("symbolize");

    assert_eq!(
        symbols.entries().collect::<Vec<_>>(),
        vec![
            SymbolRef {
                func: "func_target_a_0x1000",
                file: "/src/target_a.c",
                line: 1,
                col: 2
            },
            SymbolRef {
                func: "func_target_a_0x1010",
                file: "/src/target_a.c",
                line: 2,
                col: 2
            },
            SymbolRef {
                func: "func_lib_b.so_0x2000",
                file: "/src/lib_b.so.c",
                line: 1,
                col: 2
            },
        ]
    );
}

#[test(tokio::test)]
async fn merges_in_dso_order_not_completion_order() {
    let bin_dir = tempfile::tempdir().expect("tempdir");
    let scratch_dir = tempfile::tempdir().expect("tempdir");

    // the first DSO finishes last
    let body = format!(
        r#"case "$(basename "$3")" in
    slow*) sleep 1 ;;
esac
{}"#,
        utils::ECHO_BODY
    );
    let tool = utils::fake_symbolizer(bin_dir.path(), "sym-slow", &body);

    let pc_table = [0x1_u64, 0x2, 0x3];
    let dso_table = [
        DsoInfo::new("/bin/slow_a", 1),
        DsoInfo::new("/bin/fast_b", 1),
        DsoInfo::new("/bin/fast_c", 1),
    ];

    let symbols = Symbolizer::new(&tool, scratch_dir.path())
        .symbolize(&pc_table, &dso_table)
        .await
        .expect("symbolize");

    assert_eq!(
        symbols
            .entries()
            .map(|symbol| symbol.func.to_owned())
            .collect::<Vec<_>>(),
        vec!["func_slow_a_0x1", "func_fast_b_0x2", "func_fast_c_0x3"]
    );
}

#[test(tokio::test)]
async fn degraded_mode_without_symbolizer() {
    for tool in ["", "/dev/null"] {
        let symbols = Symbolizer::new(tool, "/tmp")
            .symbolize(&[0x1000, 0x1010], &[DsoInfo::new("/bin/target", 2)])
            .await
            .expect("symbolize");

        assert_eq!(symbols.len(), 2);
        assert!(symbols.entries().all(|symbol| symbol.is_unknown()));
    }
}

#[test(tokio::test)]
async fn failing_dso_degrades_whole_table() {
    let bin_dir = tempfile::tempdir().expect("tempdir");
    let scratch_dir = tempfile::tempdir().expect("tempdir");

    let body = format!(
        r#"if [ "$(basename "$3")" = "libbad.so" ]; then
    exit 1
fi
{}"#,
        utils::ECHO_BODY
    );
    let tool = utils::fake_symbolizer(bin_dir.path(), "sym-bad", &body);

    let pc_table = [0x1_u64, 0x2, 0x3, 0x4, 0x5, 0x6];
    let dso_table = [
        DsoInfo::new("/lib/libbad.so", 3),
        DsoInfo::new("/bin/good", 3),
    ];

    let symbols = Symbolizer::new(&tool, scratch_dir.path())
        .symbolize(&pc_table, &dso_table)
        .await
        .expect("symbolize");

    assert_eq!(symbols.len(), 6);
    assert!(symbols.entries().all(|symbol| symbol.is_unknown()));
}

#[test(tokio::test)]
async fn short_symbolizer_output_degrades_whole_table() {
    let bin_dir = tempfile::tempdir().expect("tempdir");
    let scratch_dir = tempfile::tempdir().expect("tempdir");

    // the first DSO resolves only 2 of its 3 PCs
    let body = format!(
        r#"if [ "$(basename "$3")" = "libshort.so" ]; then
    printf 'f1\n/src/a.c:1:1\n\nf2\n/src/b.c:2:2\n\n'
    exit 0
fi
{}"#,
        utils::ECHO_BODY
    );
    let tool = utils::fake_symbolizer(bin_dir.path(), "sym-short", &body);

    let pc_table = [0x1_u64, 0x2, 0x3, 0x4, 0x5, 0x6];
    let dso_table = [
        DsoInfo::new("/lib/libshort.so", 3),
        DsoInfo::new("/bin/good", 3),
    ];

    let symbols = Symbolizer::new(&tool, scratch_dir.path())
        .symbolize(&pc_table, &dso_table)
        .await
        .expect("symbolize");

    assert_eq!(symbols.len(), 6);
    assert!(symbols.entries().all(|symbol| symbol.is_unknown()));
}

#[test(tokio::test)]
async fn missing_tool_degrades_whole_table() {
    let scratch_dir = tempfile::tempdir().expect("tempdir");

    let symbols = Symbolizer::new("/nonexistent/llvm-symbolizer", scratch_dir.path())
        .symbolize(&[0x1000], &[DsoInfo::new("/bin/target", 1)])
        .await
        .expect("symbolize");

    assert_eq!(symbols.len(), 1);
    assert!(symbols.entries().all(|symbol| symbol.is_unknown()));
}

#[test(tokio::test)]
async fn rejects_mismatched_dso_table() {
    let bin_dir = tempfile::tempdir().expect("tempdir");
    let scratch_dir = tempfile::tempdir().expect("tempdir");

    let tool = utils::fake_symbolizer(bin_dir.path(), "sym-echo", utils::ECHO_BODY);
    let symbolizer = Symbolizer::new(&tool, scratch_dir.path());

    // a DSO claiming more PCs than the table holds
    let err = symbolizer
        .symbolize(&[0x1, 0x2, 0x3], &[DsoInfo::new("/bin/a", 5)])
        .await
        .expect_err("symbolize");
    assert!(matches!(err, Error::DsoTableMismatch(5, 3)));

    // a DSO table leaving PCs unassigned
    let err = symbolizer
        .symbolize(&[0x1, 0x2, 0x3], &[DsoInfo::new("/bin/a", 2)])
        .await
        .expect_err("symbolize");
    assert!(matches!(err, Error::DsoTableMismatch(2, 3)));

    // no subprocess ran
    assert_eq!(std::fs::read_dir(scratch_dir.path()).expect("read dir").count(), 0);
}

#[test(tokio::test)]
async fn removes_scratch_files() {
    let bin_dir = tempfile::tempdir().expect("tempdir");
    let scratch_dir = tempfile::tempdir().expect("tempdir");

    let tool = utils::fake_symbolizer(bin_dir.path(), "sym-echo", utils::ECHO_BODY);

    Symbolizer::new(&tool, scratch_dir.path())
        .symbolize(&[0x1000, 0x2000], &[DsoInfo::new("/bin/target", 2)])
        .await
        .expect("symbolize");

    assert_eq!(std::fs::read_dir(scratch_dir.path()).expect("read dir").count(), 0);
}
