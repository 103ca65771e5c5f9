use super::*;

#[test]
fn keeps_file_order() {
    let lib = MaskLibrary::from_json(
        r#"{"Zigzag": "z.gif", "Clock": "clock.gif", "Bars": "/abs/bars.gif"}"#,
        "/masks",
    )
    .unwrap();
    assert_eq!(lib.names().collect::<Vec<_>>(), vec!["Zigzag", "Clock", "Bars"]);
    assert_eq!(lib.len(), 3);
}

#[test]
fn resolves_relative_to_library_dir() {
    let lib =
        MaskLibrary::from_json(r#"{"Clock": "gifs/clock.gif", "Bars": "/abs/bars.gif"}"#, "/masks")
            .unwrap();
    assert_eq!(
        lib.resolve("Clock"),
        Some(PathBuf::from("/masks/gifs/clock.gif"))
    );
    assert_eq!(lib.resolve("Bars"), Some(PathBuf::from("/abs/bars.gif")));
    assert_eq!(lib.resolve("Missing"), None);

    let entries: Vec<_> = lib.entries().collect();
    assert_eq!(entries[0], ("Clock", PathBuf::from("/masks/gifs/clock.gif")));
}

#[test]
fn rejects_non_string_or_empty_paths() {
    assert!(matches!(
        MaskLibrary::from_json(r#"{"A": 3}"#, ""),
        Err(WipeError::Validation(_))
    ));
    assert!(matches!(
        MaskLibrary::from_json(r#"{"A": ""}"#, ""),
        Err(WipeError::Validation(_))
    ));
    assert!(matches!(
        MaskLibrary::from_json("[1, 2]", ""),
        Err(WipeError::Serde(_))
    ));
}

#[test]
fn loads_from_disk() {
    let dir = std::env::temp_dir().join(format!("colorwipe-lib-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("wipes.json");
    std::fs::write(&file, r#"{"Soft": "soft.gif"}"#).unwrap();

    let lib = MaskLibrary::load(&file).unwrap();
    assert_eq!(lib.resolve("Soft"), Some(dir.join("soft.gif")));

    std::fs::remove_dir_all(&dir).unwrap();
    assert!(MaskLibrary::load(&file).is_err());
}
