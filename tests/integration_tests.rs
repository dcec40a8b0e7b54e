use csvx::{
    from_slice_with_options, from_str, from_str_typed, record, value, CsvOptions, Decoder, Error,
    Record, ScalarKind, Value,
};

fn untyped(data: &str) -> Vec<Record> {
    from_slice_with_options(
        data.as_bytes(),
        CsvOptions::untyped().with_trim_leading_space(true),
    )
    .unwrap()
}

fn typed(data: &str, skip_empty_columns: bool) -> csvx::Result<Vec<Record>> {
    from_slice_with_options(
        data.as_bytes(),
        CsvOptions::typed()
            .with_trim_leading_space(true)
            .with_skip_empty_columns(skip_empty_columns),
    )
}

#[test]
fn test_untyped_single_row() {
    let records = untyped(
        "
        foo,bar
        first,second",
    );
    assert_eq!(records, vec![record!({ "foo": "first", "bar": "second" })]);
}

#[test]
fn test_untyped_multiple_rows() {
    let records = untyped(
        "
        foo,bar
        first,second
        third,fourth",
    );
    assert_eq!(
        records,
        vec![
            record!({ "foo": "first", "bar": "second" }),
            record!({ "foo": "third", "bar": "fourth" }),
        ]
    );
}

#[test]
fn test_untyped_empty_row_is_skipped() {
    let records = untyped(
        "foo,bar
        ,
        first,second
        third,fourth",
    );
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], record!({ "foo": "first", "bar": "second" }));
}

#[test]
fn test_untyped_empty_column_is_kept() {
    let records = untyped(
        "foo,placeholder,bar
        ,,
        first,,second
        third,,fourth",
    );
    assert_eq!(
        records,
        vec![
            record!({ "foo": "first", "placeholder": "", "bar": "second" }),
            record!({ "foo": "third", "placeholder": "", "bar": "fourth" }),
        ]
    );
}

#[test]
fn test_untyped_comments() {
    for data in [
        "foo,bar\nfirst,second\n#third,fourth",
        "foo,bar\n    first,second\n    #third,fourth",
        "foo,bar\n    first,second\n    # third,fourth",
    ] {
        assert_eq!(
            untyped(data),
            vec![record!({ "foo": "first", "bar": "second" })],
            "input {:?}",
            data
        );
    }
}

#[test]
fn test_untyped_only_blank_and_comments_is_empty_not_error() {
    let records = untyped(
        "
        foo,bar

        # third,fourth",
    );
    assert!(records.is_empty());
}

#[test]
fn test_typed_strings() {
    let records = typed(
        "
        foo,bar
        string,string
        first,second
        third,fourth",
        false,
    )
    .unwrap();
    assert_eq!(
        records,
        vec![
            record!({ "foo": "first", "bar": "second" }),
            record!({ "foo": "third", "bar": "fourth" }),
        ]
    );
}

#[test]
fn test_typed_int64() {
    let records = typed(
        "
        foo,bar
        string,int64
        first,10
        third,20",
        false,
    )
    .unwrap();
    assert_eq!(
        records,
        vec![
            record!({ "foo": "first", "bar": 10 }),
            record!({ "foo": "third", "bar": 20 }),
        ]
    );
}

#[test]
fn test_typed_json() {
    let records = typed(
        r#"
        foo,bar,subtype
        string,int,json
        first,10,{"key": 10}"#,
        false,
    )
    .unwrap();
    assert_eq!(
        records,
        vec![record!({ "foo": "first", "bar": 10, "subtype": { "key": 10 } })]
    );
}

#[test]
fn test_typed_nullable_with_values() {
    let records = typed(
        r#"
        foo,bar,subtype
        *string,*int,*json
        first,10,{"key": 10}"#,
        false,
    )
    .unwrap();
    assert_eq!(
        records,
        vec![record!({ "foo": "first", "bar": 10, "subtype": { "key": 10 } })]
    );
}

#[test]
fn test_typed_nullable_empty_cells() {
    let records = from_str_typed("foo,bar\n*string,*int\n,10").unwrap();
    assert_eq!(records, vec![record!({ "foo": null, "bar": 10 })]);
}

#[test]
fn test_typed_empty_row() {
    let records = typed(
        "
        foo,bar
        string,int64
        ,
        first,10",
        false,
    )
    .unwrap();
    assert_eq!(records, vec![record!({ "foo": "first", "bar": 10 })]);
}

#[test]
fn test_typed_skip_empty_type_column() {
    let records = typed(
        "
        foo,placeholder,bar
        string,,int64
        ,,
        first,test,10",
        true,
    )
    .unwrap();
    assert_eq!(records, vec![record!({ "foo": "first", "bar": 10 })]);
}

#[test]
fn test_typed_blank_line_between_types_and_data() {
    let records = typed(
        "
        foo,placeholder,bar
        string,,int64

        first,test,10",
        true,
    )
    .unwrap();
    assert_eq!(records, vec![record!({ "foo": "first", "bar": 10 })]);
}

#[test]
fn test_typed_arrays_in_quoted_cells() {
    let data = "id,scores,flags,tags\n\
                int64,\"float64,array\",\"*bool,array\",\"string,array\"\n\
                1,\"1.5,2\",\"true,false\",\"a,b\"\n\
                2,,,";
    let records = from_str_typed(data).unwrap();
    assert_eq!(
        records,
        vec![
            record!({ "id": 1, "scores": [1.5, 2.0], "flags": [true, false], "tags": ["a", "b"] }),
            record!({ "id": 2, "scores": [], "flags": null, "tags": [] }),
        ]
    );
}

#[test]
fn test_trim_reads_indented_quoted_cells() {
    let records = untyped("a,b\nx, \"p,q\"");
    assert_eq!(records, vec![record!({ "a": "x", "b": "p,q" })]);
}

#[test]
fn test_typed_aligned_columns_with_quoted_types() {
    let records = typed(
        "
        name,   ids,             tags
        string, \"int64,array\", \"*string,array\"
        x,      \"1, 2\",        \"a,b\"
        y,      ,                ",
        false,
    )
    .unwrap();
    assert_eq!(
        records,
        vec![
            record!({ "name": "x", "ids": [1, 2], "tags": ["a", "b"] }),
            record!({ "name": "y", "ids": [], "tags": null }),
        ]
    );
}

#[test]
fn test_typed_all_scalars_zero_values() {
    let data = "s,i,i64,f,b\nstring,int,int64,float64,bool\n,,,,\nx,,,,";
    let records = from_str_typed(data).unwrap();
    assert_eq!(
        records,
        vec![record!({ "s": "x", "i": 0, "i64": 0, "f": 0.0, "b": false })]
    );
}

#[test]
fn test_typed_bad_cell_aborts_whole_document() {
    let err = from_str_typed("foo,bar\nstring,int64\nfirst,10\nsecond,notanumber").unwrap_err();
    assert_eq!(err.root(), &Error::numeric_parse("notanumber", "int64"));
}

#[test]
fn test_typed_multi_row_array_cell() {
    let err = from_str_typed("a\n\"int64,array\"\n\"1,2\n3,4\"").unwrap_err();
    assert_eq!(
        err.root(),
        &Error::ArrayMultiRow {
            element: ScalarKind::Int64
        }
    );
}

#[test]
fn test_typed_bad_json_cell() {
    let err = from_str_typed("a\njson\n{oops").unwrap_err();
    assert!(matches!(err.root(), Error::EmbeddedDocument { .. }));
}

#[test]
fn test_too_short_documents() {
    assert!(matches!(
        from_str(""),
        Err(Error::DocumentTooShort { required: 1, .. })
    ));
    assert!(matches!(
        from_str_typed("a,b"),
        Err(Error::DocumentTooShort { required: 2, found: 1 })
    ));
}

#[test]
fn test_duplicate_names_last_column_wins() {
    let records = from_str_typed("a,b,a\nint,string,bool\n1,x,true").unwrap();
    assert_eq!(records, vec![record!({ "a": true, "b": "x" })]);
}

#[test]
fn test_tab_delimiter() {
    let decoder = Decoder::new(CsvOptions::typed().with_delimiter('\t')).unwrap();
    let records = decoder
        .decode_str("name\tids\nstring\tint,array\nx\t1\t2")
        .unwrap();
    // The array cell is cut at the first tab, so only "1" belongs to it.
    assert_eq!(records, vec![record!({ "name": "x", "ids": [1] })]);
}

#[test]
fn test_decoder_reuse_is_idempotent() {
    let decoder = Decoder::new(CsvOptions::typed()).unwrap();
    let data = b"a,b\n*int,json\n1,[1]\n,{}";
    let first = decoder.decode(data).unwrap();
    let second = decoder.decode(data).unwrap();
    assert_eq!(first, second);
    assert_eq!(first[1].get("a"), Some(&Value::Null));
    assert_eq!(first[1].get("b"), Some(&value!({})));
}

#[test]
fn test_decoder_shared_across_threads() {
    let decoder = Decoder::new(CsvOptions::typed()).unwrap();
    let data = "n\nint64\n1\n2\n3";

    let results: Vec<Vec<Record>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| decoder.decode_str(data).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for records in results {
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].get("n"), Some(&Value::from(3)));
    }
}

#[test]
fn test_records_serialize_to_json() {
    let records = from_str_typed("a,b\nint,*string\n1,").unwrap();
    let json = serde_json::to_string(&records).unwrap();
    assert_eq!(json, r#"[{"a":1,"b":null}]"#);
}
