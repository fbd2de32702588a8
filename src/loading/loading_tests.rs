use super::*;
use std::io::Write;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create file");
    file.write_all(contents.as_bytes()).expect("write file");
    path
}

const SCORES: &str = "id,group,score,passed\n\
                      1,a,3.5,true\n\
                      2,b,4,FALSE\n\
                      3,a,,true\n\
                      4,b,5.25,false\n";

#[test]
fn test_load_csv_infers_cells() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "scores.csv", SCORES);

    let mut loader = DataLoader::new();
    let table = loader.load_csv(&path, CsvOptions::default()).expect("load CSV");

    assert_eq!(table.shape(), (4, 4));
    assert_eq!(table.column_names(), vec!["id", "group", "score", "passed"]);
    assert_eq!(table.numeric("score").expect("numeric"), vec![3.5, 4.0, 5.25]);
    assert_eq!(
        table.column("passed").expect("column").cells()[1],
        Cell::Bool(false)
    );
    assert_eq!(
        table.categorical("group").expect("column"),
        vec!["a", "b", "a", "b"]
    );
}

#[test]
fn test_get_returns_last_table() {
    let dir = TempDir::new().expect("temp dir");
    let first = write_file(&dir, "first.csv", "x\n1\n");
    let second = write_file(&dir, "second.csv", "y\n1\n2\n");

    let mut loader = DataLoader::new();
    assert!(loader.get().expect_err("nothing loaded").is_validation());

    loader.load_csv(&first, CsvOptions::default()).expect("load");
    loader.load_csv(&second, CsvOptions::default()).expect("load");
    let table = loader.get().expect("loaded");
    assert_eq!(table.column_names(), vec!["y"]);
    assert_eq!(table.n_rows(), 2);
}

#[test]
fn test_wrong_extension_is_validation_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "scores.txt", SCORES);

    let mut loader = DataLoader::new();
    let err = loader
        .load_csv(&path, CsvOptions::default())
        .expect_err("not a .csv");
    assert!(err.is_validation());
    assert!(err.to_string().contains("File should be in CSV format."));

    let err = loader
        .load_excel(dir.path().join("book.xls"), ExcelOptions::default())
        .expect_err("not a .xlsx");
    assert!(err.to_string().contains("File should be in Excel (.xlsx) format."));
}

#[test]
fn test_mismatched_options() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "scores.csv", SCORES);

    let err = DataLoader::new()
        .load(&path, TableFormat::Csv, LoadOptions::default_for(TableFormat::Excel))
        .expect_err("Excel options for a CSV file");
    assert!(err.is_validation());
}

#[test]
fn test_missing_file_is_load_error() {
    let dir = TempDir::new().expect("temp dir");
    let mut loader = DataLoader::new();

    let err = loader
        .load_csv(dir.path().join("absent.csv"), CsvOptions::default())
        .expect_err("no such file");
    assert!(matches!(err, HypothesisError::Load { .. }));

    let err = loader
        .load_excel(dir.path().join("absent.xlsx"), ExcelOptions::default())
        .expect_err("no such file");
    assert!(matches!(err, HypothesisError::Load { .. }));
    assert!(loader.get().is_err());
}

#[test]
fn test_usecols_and_index_col() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "scores.csv", SCORES);

    let options = CsvOptions {
        usecols: Some(vec!["score".into(), ColumnSelector::Position(0)]),
        index_col: Some("id".into()),
        ..CsvOptions::default()
    };
    let mut loader = DataLoader::new();
    let table = loader.load_csv(&path, options).expect("load CSV");

    assert_eq!(table.column_names(), vec!["score"]);
    let index = table.index().expect("index column");
    assert_eq!(index.name(), "id");
    assert_eq!(index.cells()[3], Cell::Int(4));
}

#[test]
fn test_names_and_separator() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "raw.csv", "1;x\n2;y\n3;x\n");

    let options = CsvOptions {
        sep: b';',
        names: Some(vec!["n".into(), "label".into()]),
        ..CsvOptions::default()
    };
    let mut loader = DataLoader::new();
    let table = loader.load_csv(&path, options).expect("load CSV");

    assert_eq!(table.shape(), (3, 2));
    assert_eq!(table.numeric("n").expect("numeric"), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_dtype_override() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "codes.csv", "code,value\n007,1\n010,2\n");

    let options = CsvOptions {
        dtype: Some(BTreeMap::from([
            ("code".to_string(), ColumnType::Text),
            ("value".to_string(), ColumnType::Float),
        ])),
        ..CsvOptions::default()
    };
    let mut loader = DataLoader::new();
    let table = loader.load_csv(&path, options).expect("load CSV");

    assert_eq!(table.categorical("code").expect("column"), vec!["007", "010"]);
    assert_eq!(
        table.column("value").expect("column").cells()[0],
        Cell::Float(1.0)
    );
}

#[test]
fn test_failed_cast_is_load_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "scores.csv", SCORES);

    let options = CsvOptions {
        dtype: Some(BTreeMap::from([("group".to_string(), ColumnType::Int)])),
        ..CsvOptions::default()
    };
    let err = DataLoader::new()
        .load_csv(&path, options)
        .expect_err("letters are not integers");
    assert!(matches!(err, HypothesisError::Load { .. }));
    assert!(err.to_string().contains("Cannot cast column 'group'"));
}

#[test]
fn test_unknown_usecol_is_load_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "scores.csv", SCORES);

    let options = CsvOptions {
        usecols: Some(vec!["missing".into()]),
        ..CsvOptions::default()
    };
    let err = DataLoader::new()
        .load_csv(&path, options)
        .expect_err("no such column");
    assert!(matches!(err, HypothesisError::Load { .. }));
}

/// Two sheets: a throwaway first sheet and a "Scores" sheet of 4 rows.
fn write_workbook(dir: &TempDir) -> std::path::PathBuf {
    use rust_xlsxwriter::Workbook;

    let path = dir.path().join("scores.xlsx");
    let mut workbook = Workbook::new();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").expect("sheet name");
    notes.write_string(0, 0, "comment").expect("write");
    notes.write_string(1, 0, "draft").expect("write");

    let scores = workbook.add_worksheet();
    scores.set_name("Scores").expect("sheet name");
    for (col, header) in ["id", "weight", "group", "fasted"].iter().enumerate() {
        scores.write_string(0, col as u16, *header).expect("write header");
    }
    let rows = [
        (1.0, 61.5, "b", true),
        (2.0, 63.0, "a", false),
        (3.0, 64.5, "b", true),
        (4.0, 66.0, "a", false),
    ];
    for (i, (id, weight, group, fasted)) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        scores.write_number(row, 0, *id).expect("write");
        scores.write_number(row, 1, *weight).expect("write");
        scores.write_string(row, 2, *group).expect("write");
        scores.write_boolean(row, 3, *fasted).expect("write");
    }

    workbook.save(&path).expect("save workbook");
    path
}

#[test]
fn test_load_excel_sheet_by_name() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_workbook(&dir);

    let options = ExcelOptions {
        sheet: SheetSelector::Name("Scores".into()),
        index_col: Some(ColumnSelector::Position(0)),
        ..ExcelOptions::default()
    };
    let mut loader = DataLoader::new();
    let table = loader.load_excel(&path, options).expect("load workbook");

    assert_eq!(table.shape(), (4, 3));
    assert_eq!(table.column_names(), vec!["weight", "group", "fasted"]);
    assert_eq!(
        table.numeric("weight").expect("numeric"),
        vec![61.5, 63.0, 64.5, 66.0]
    );
    assert_eq!(
        table.categorical("group").expect("column"),
        vec!["b", "a", "b", "a"]
    );
    assert_eq!(table.column("fasted").expect("column").cells()[1], Cell::Bool(false));
    assert_eq!(table.index().expect("index column").name(), "id");
}

#[test]
fn test_load_excel_default_sheet_and_usecols() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_workbook(&dir);
    let mut loader = DataLoader::new();

    let first = loader
        .load_excel(&path, ExcelOptions::default())
        .expect("load first sheet");
    assert_eq!(first.column_names(), vec!["comment"]);
    assert_eq!(first.categorical("comment").expect("column"), vec!["draft"]);

    let options = ExcelOptions {
        sheet: SheetSelector::Index(1),
        usecols: Some(vec!["group".into(), "weight".into()]),
        ..ExcelOptions::default()
    };
    let table = loader.load_excel(&path, options).expect("load second sheet");
    assert_eq!(table.column_names(), vec!["weight", "group"]);
    assert!(table.index().is_none());
}

#[test]
fn test_load_excel_unknown_sheet_is_load_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_workbook(&dir);

    let options = ExcelOptions {
        sheet: SheetSelector::Name("Missing".into()),
        ..ExcelOptions::default()
    };
    let err = DataLoader::new()
        .load_excel(&path, options)
        .expect_err("no such sheet");
    assert!(matches!(err, HypothesisError::Load { .. }));

    let options = ExcelOptions {
        sheet: SheetSelector::Index(5),
        ..ExcelOptions::default()
    };
    assert!(DataLoader::new().load_excel(&path, options).is_err());
}

#[test]
fn test_blank_and_repeated_headers_are_renamed() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "export.csv", ",dose,dose,dose.1\n1,2,3,4\n2,5,6,7\n");

    let mut loader = DataLoader::new();
    let table = loader.load_csv(&path, CsvOptions::default()).expect("load CSV");
    assert_eq!(
        table.column_names(),
        vec!["Unnamed: 0", "dose", "dose.1", "dose.1.1"]
    );
    assert_eq!(table.numeric("dose.1").expect("numeric"), vec![3.0, 6.0]);

    let options = CsvOptions {
        index_col: Some("Unnamed: 0".into()),
        ..CsvOptions::default()
    };
    let table = loader.load_csv(&path, options).expect("load CSV");
    assert_eq!(table.shape(), (2, 3));
}

#[test]
fn test_missing_markers_are_skipped_by_numeric() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "weights.csv", "weight\n61.5\nNaN\n63\nNA\n64.5\n");

    let mut loader = DataLoader::new();
    let table = loader.load_csv(&path, CsvOptions::default()).expect("load CSV");
    assert_eq!(table.n_rows(), 5);
    assert_eq!(table.numeric("weight").expect("numeric"), vec![61.5, 63.0, 64.5]);
}
