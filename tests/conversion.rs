// tests/conversion.rs

//! End-to-end conversion tests: jsonwall manifest in, SPDX document out.

mod common;

use chisel_sbom::spdx::ElementId;
use chisel_sbom::{convert, Error};
use common::*;

const PLAIN_FILE_COMMENT: &str =
    "This file is included in the slice(s) test_slice; see Relationship information.";
const MODIFIED_FILE_COMMENT: &str =
    "This file is mutated by the slice test_slice; see Relationship information.";

#[test]
fn test_convert_plain_manifest() {
    let doc = convert(MANIFEST_PLAIN.as_bytes(), "").unwrap();
    assert_eq!(
        doc,
        document(
            vec![package_node("amd64", None), slice_node()],
            vec![file_node("sha256", PLAIN_FILE_COMMENT)],
            vec![
                describes(ElementId::package("test")),
                package_contains_slice(),
                slice_contains_file(),
            ],
        )
    );
}

#[test]
fn test_convert_modified_file() {
    let doc = convert(MANIFEST_MODIFIED.as_bytes(), "").unwrap();
    assert_eq!(
        doc,
        document(
            vec![package_node("all", None), slice_node()],
            vec![file_node("final_sha256", MODIFIED_FILE_COMMENT)],
            vec![
                describes(ElementId::package("test")),
                package_contains_slice(),
                file_modified_by_slice(),
            ],
        )
    );
}

#[test]
fn test_convert_with_distro() {
    for (manifest, arch, file) in [
        (MANIFEST_PLAIN, "amd64", file_node("sha256", PLAIN_FILE_COMMENT)),
        (MANIFEST_MODIFIED, "all", file_node("final_sha256", MODIFIED_FILE_COMMENT)),
    ] {
        let doc = convert(manifest.as_bytes(), "24.04").unwrap();
        let file_relationship = if manifest == MANIFEST_PLAIN {
            slice_contains_file()
        } else {
            file_modified_by_slice()
        };
        assert_eq!(
            doc,
            document(
                vec![
                    os_node("24.04"),
                    package_node(arch, Some("ubuntu-24.04")),
                    slice_node(),
                ],
                vec![file],
                vec![
                    describes(ElementId::operating_system("ubuntu", "24.04")),
                    describes(ElementId::package("test")),
                    package_contains_slice(),
                    file_relationship,
                ],
            )
        );
    }
}

#[test]
fn test_purl_suffixed_exactly_once() {
    let doc = convert(MANIFEST_PLAIN.as_bytes(), "24.04").unwrap();
    let package = find_package(&doc, &ElementId::package("test")).unwrap();
    assert_eq!(
        package.external_refs[1].locator,
        "pkg:deb/ubuntu/test@1.0?arch=amd64&distro=ubuntu-24.04"
    );
    let json = doc.to_json_pretty().unwrap();
    assert_eq!(json.matches("&distro=").count(), 1);
    assert!(json.contains("\"pkg:deb/ubuntu/test@1.0?arch=amd64&distro=ubuntu-24.04\""));

    let doc = convert(MANIFEST_PLAIN.as_bytes(), "").unwrap();
    assert!(!doc.to_json_pretty().unwrap().contains("distro="));
}

#[test]
fn test_convert_is_deterministic() {
    let first = convert(MANIFEST_MODIFIED.as_bytes(), "24.04").unwrap();
    let second = convert(MANIFEST_MODIFIED.as_bytes(), "24.04").unwrap();
    assert_eq!(first.to_json_pretty().unwrap(), second.to_json_pretty().unwrap());
}

#[test]
fn test_unknown_kinds_are_ignored() {
    let manifest = r#"
        {"jsonwall":"1.0","schema":"1.0","count":5}
        {"kind":"content","slice":"test_slice","path":"/test"}
        {"kind":"package","name":"test","version":"1.0","sha256":"sha256","arch":"amd64"}
        {"kind":"path","path":"/test","mode":"0644","slices":["test_slice"],"sha256":"sha256","size":1024}
        {"kind":"slice","name":"test_slice"}
        {"kind":"something-new","name":"x"}
    "#;
    let with_extras = convert(manifest.as_bytes(), "").unwrap();
    let plain = convert(MANIFEST_PLAIN.as_bytes(), "").unwrap();
    assert_eq!(with_extras, plain);
}

#[test]
fn test_relationship_count_matches_claiming_slices() {
    let manifest = r#"
        {"jsonwall":"1.0","schema":"1.0","count":6}
        {"kind":"package","name":"libc6","version":"2.39","sha256":"p","arch":"amd64"}
        {"kind":"path","path":"/etc/ld.so.conf","mode":"0644","slices":["libc6_config"],"sha256":"a"}
        {"kind":"path","path":"/usr/share/doc/libc6/copyright","mode":"0644","slices":["libc6_config","libc6_libs"],"sha256":"b"}
        {"kind":"path","path":"/lib64","mode":"0777","slices":["libc6_libs"],"link":"usr/lib64"}
        {"kind":"slice","name":"libc6_config"}
        {"kind":"slice","name":"libc6_libs"}
    "#;
    let doc = convert(manifest.as_bytes(), "").unwrap();

    for (path, expected) in [
        ("/etc/ld.so.conf", 1),
        ("/usr/share/doc/libc6/copyright", 2),
        ("/lib64", 1),
    ] {
        let id = ElementId::file(path);
        assert_eq!(doc.relationships_of(&id).count(), expected, "{}", path);
    }
    for slice in ["libc6_config", "libc6_libs"] {
        let id = ElementId::slice(slice);
        let owners: Vec<_> = doc
            .relationships
            .iter()
            .filter(|r| r.related_spdx_element == id)
            .map(|r| r.element.clone())
            .collect();
        assert_eq!(owners, vec![ElementId::package("libc6")]);
    }
    // Symlinks without a content checksum keep an empty one
    assert_eq!(find_file(&doc, &ElementId::file("/lib64")).unwrap().checksums[0].value, "");
}

#[test]
fn test_invalid_link_fails_conversion() {
    let manifest = r#"
        {"jsonwall":"1.0","schema":"1.0","count":1}
        {"kind":"path","path":"/test","mode":"0644","slices":[],"sha256":"s","final_sha256":"f","link":"/other"}
    "#;
    let err = convert(manifest.as_bytes(), "").unwrap_err();
    assert!(matches!(err, Error::Build(_)));
    assert_eq!(
        err.to_string(),
        "cannot build file section: invalid link: link /test has a final sha256"
    );
}

#[test]
fn test_missing_owner_fails_conversion() {
    let manifest = r#"
        {"jsonwall":"1.0","schema":"1.0","count":1}
        {"kind":"slice","name":"ghost_slice"}
    "#;
    let err = convert(manifest.as_bytes(), "").unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot build slice section: cannot find package ghost for slice ghost_slice"
    );
}

#[test]
fn test_malformed_manifest_is_a_decode_error() {
    let err = convert(&b"{\"jsonwall\":\"1.0\",\"schema\":\"1.0\",\"count\":1}\n{oops\n"[..], "")
        .unwrap_err();
    assert!(matches!(err, Error::Manifest(_)));
}
