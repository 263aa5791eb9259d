//! Fold semantics and derived-metric arithmetic on synthetic fixtures.

use dbspace::{ObjSpaceUsed, SpaceReport};

fn rowid_table() -> ObjSpaceUsed {
    ObjSpaceUsed {
        name: "t".into(),
        tbl_name: "t".into(),
        is_index: false,
        is_without_rowid: false,
        nentry: 100, // includes interior cells
        leaf_entries: 90,
        payload: 10_000, // includes the 1000 overflowed bytes
        ovfl_payload: 1_000,
        ovfl_cnt: 1,
        mx_payload: 5_000,
        int_pages: 1,
        leaf_pages: 5,
        ovfl_pages: 2,
        int_unused: 100,
        leaf_unused: 700,
        ovfl_unused: 200,
        compressed_size: 8 * 4096,
        depth: 2,
        gap_cnt: 0,
        cnt: 0,
    }
}

fn without_rowid_table() -> ObjSpaceUsed {
    ObjSpaceUsed {
        name: "wr".into(),
        tbl_name: "wr".into(),
        is_without_rowid: true,
        nentry: 50,
        leaf_entries: 44,
        payload: 2_000,
        mx_payload: 300,
        leaf_pages: 2,
        leaf_unused: 150,
        compressed_size: 2 * 4096,
        depth: 1,
        ..ObjSpaceUsed::default()
    }
}

fn index_obj() -> ObjSpaceUsed {
    ObjSpaceUsed {
        name: "t_idx".into(),
        tbl_name: "t".into(),
        is_index: true,
        nentry: 70,
        leaf_entries: 60,
        payload: 1_500,
        mx_payload: 40,
        int_pages: 1,
        leaf_pages: 2,
        int_unused: 50,
        leaf_unused: 250,
        compressed_size: 3 * 4096,
        depth: 3,
        ..ObjSpaceUsed::default()
    }
}

#[test]
fn fold_selects_row_count_per_object_kind() {
    let mut total = ObjSpaceUsed::default();
    total.fold(&rowid_table());
    // Rowid table: leaf entries only, interior cells are routing.
    assert_eq!(total.nentry, 90);

    total.fold(&without_rowid_table());
    // WITHOUT ROWID: nentry verbatim (44 would be wrong).
    assert_eq!(total.nentry, 90 + 50);

    total.fold(&index_obj());
    assert_eq!(total.nentry, 90 + 50 + 70);
    assert_eq!(total.cnt, 3);
}

#[test]
fn fold_sums_and_maxima() {
    let mut total = ObjSpaceUsed::default();
    total.fold(&rowid_table());
    total.fold(&without_rowid_table());
    total.fold(&index_obj());

    assert_eq!(total.payload, 10_000 + 2_000 + 1_500);
    assert_eq!(total.ovfl_payload, 1_000);
    assert_eq!(total.ovfl_cnt, 1);
    assert_eq!(total.int_pages, 2);
    assert_eq!(total.leaf_pages, 9);
    assert_eq!(total.ovfl_pages, 2);
    assert_eq!(total.int_unused, 150);
    assert_eq!(total.leaf_unused, 1_100);
    assert_eq!(total.ovfl_unused, 200);
    assert_eq!(total.compressed_size, 13 * 4096);
    assert_eq!(total.mx_payload, 5_000);
    assert_eq!(total.depth, 3);
    assert_eq!(total.page_count(), 13);
}

#[test]
fn report_storage_and_percentages() {
    let mut one = ObjSpaceUsed::default();
    one.fold(&rowid_table());

    let report = SpaceReport::new(&one, 4096, 100);
    assert_eq!(report.total_pages, 8);
    assert_eq!(report.storage, 8 * 4096);
    assert_eq!(report.total_pages_percent, 8.0);
    // payload 10000 over storage 32768: 30.5175.. -> 30.52 after add-half.
    assert_eq!(report.payload, 10_000);
    assert_eq!(report.payload_percent, 30.52);
    assert_eq!(report.total_unused, 1_000);
    // metadata picks up the 4-byte next pointer of the chained overflow page:
    // 32768 - 10000 - 1000 + 4*(2 - 1) = 21772.
    assert_eq!(report.total_meta, 21_772);
}

#[test]
fn report_averages_divide_by_folded_entry_count() {
    let mut one = ObjSpaceUsed::default();
    one.fold(&rowid_table());
    let report = SpaceReport::new(&one, 4096, 100);

    // 90 leaf entries were folded in.
    assert_eq!(report.nentry, 90);
    assert!((report.avg_payload - 10_000.0 / 90.0).abs() < 1e-9);
    assert!((report.avg_unused - 1_000.0 / 90.0).abs() < 1e-9);
    assert!((report.avg_meta - 21_772.0 / 90.0).abs() < 1e-9);
}

#[test]
fn report_averages_zero_for_empty_object() {
    // An empty table: dbstat returns all-NULL sums read as zeros.
    let mut one = ObjSpaceUsed::default();
    one.fold(&ObjSpaceUsed::default());
    let report = SpaceReport::new(&one, 4096, 10);

    assert_eq!(report.nentry, 0);
    assert_eq!(report.avg_payload, 0.0);
    assert_eq!(report.avg_unused, 0.0);
    assert_eq!(report.avg_meta, 0.0);
}

#[test]
fn report_compression_heuristic() {
    // Uncompressed store: pgsize sum equals storage, no compressed line.
    let mut plain = ObjSpaceUsed::default();
    plain.fold(&rowid_table());
    let report = SpaceReport::new(&plain, 4096, 100);
    assert_eq!(report.compressed_size, None);

    // Compressed store: pgsize sum below storage gains 14 bytes per page.
    let mut squeezed = rowid_table();
    squeezed.compressed_size = 20_000;
    let mut one = ObjSpaceUsed::default();
    one.fold(&squeezed);
    let report = SpaceReport::new(&one, 4096, 100);
    assert_eq!(report.compressed_size, Some(20_000 + 14 * 8));
}

#[test]
fn report_fragmentation_needs_two_pages() {
    let single = ObjSpaceUsed {
        leaf_pages: 1,
        nentry: 3,
        cnt: 1,
        ..ObjSpaceUsed::default()
    };
    assert_eq!(SpaceReport::new(&single, 4096, 10).fragmentation, None);

    let mut frag = rowid_table();
    frag.gap_cnt = 3;
    let mut one = ObjSpaceUsed::default();
    one.fold(&frag);
    // percent(3, 7) = 42.857.. -> 42.86.
    assert_eq!(SpaceReport::new(&one, 4096, 100).fragmentation, Some(42.86));
}

#[test]
fn report_depth_only_for_single_object() {
    let mut one = ObjSpaceUsed::default();
    one.fold(&rowid_table());
    assert_eq!(SpaceReport::new(&one, 4096, 100).depth, Some(2));

    one.fold(&index_obj());
    assert_eq!(SpaceReport::new(&one, 4096, 100).depth, None);
}

#[test]
fn report_per_category_unused_gated_on_page_counts() {
    let mut one = ObjSpaceUsed::default();
    one.fold(&without_rowid_table()); // leaf pages only
    let report = SpaceReport::new(&one, 4096, 100);

    assert_eq!(report.int_unused_percent, None);
    assert_eq!(report.ovfl_unused_percent, None);
    // percent(150, 2*4096) = 1.831.. -> 1.83.
    assert_eq!(report.leaf_unused_percent, Some(1.83));
}
