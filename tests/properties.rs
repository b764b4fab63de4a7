//! Conversion laws that must hold for every supported encoding

use cyrconv::tables::{self, REPLACEMENT};
use cyrconv::{Converter, Encoding, Error, convert};

fn all_bytes() -> Vec<u8> {
    (0..=255u8).collect()
}

/// Code points the converter should produce for `input`
fn expected_code_points(encoding: Encoding, input: &[u8]) -> Vec<u32> {
    input
        .iter()
        .map(|&b| {
            if b < 0x80 {
                u32::from(b)
            } else {
                u32::from(tables::lookup(encoding, b))
            }
        })
        .collect()
}

#[test]
fn every_byte_converts_to_one_to_three_bytes() {
    for encoding in Encoding::ALL {
        let converter = Converter::new(encoding);
        for byte in 0..=255u8 {
            let n = converter.convert(&[byte]).len();
            assert!((1..=3).contains(&n), "{encoding} 0x{byte:02X} -> {n} bytes");
        }
    }
}

#[test]
fn ascii_is_a_fixpoint() {
    let ascii: Vec<u8> = (0..0x80u8).collect();
    for encoding in Encoding::ALL {
        assert_eq!(Converter::new(encoding).convert(&ascii), ascii);
    }
}

#[test]
fn output_decodes_back_to_table_code_points() {
    let input = all_bytes();
    for encoding in Encoding::ALL {
        let output = Converter::new(encoding).convert(&input);
        let text = std::str::from_utf8(&output).expect("well-formed UTF-8");
        let decoded: Vec<u32> = text.chars().map(u32::from).collect();

        assert_eq!(decoded, expected_code_points(encoding, &input));
    }
}

#[test]
fn output_length_is_bounded() {
    let input = all_bytes().repeat(3);
    for encoding in Encoding::ALL {
        let n = Converter::new(encoding).convert(&input).len();
        assert!(n >= input.len());
        assert!(n <= input.len() * 3);
    }
}

#[test]
fn encodings_differ_only_where_tables_differ() {
    let ascii = b"The quick brown fox, 0123456789!";
    let outputs: Vec<Vec<u8>> = Encoding::ALL
        .iter()
        .map(|&e| Converter::new(e).convert(ascii))
        .collect();
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));

    for a in Encoding::ALL {
        for b in Encoding::ALL {
            for byte in 0x80..=0xFFu8 {
                let same_table = tables::lookup(a, byte) == tables::lookup(b, byte);
                let same_output =
                    Converter::new(a).convert(&[byte]) == Converter::new(b).convert(&[byte]);
                assert_eq!(same_table, same_output, "{a} vs {b} at 0x{byte:02X}");
            }
        }
    }
}

#[test]
fn single_ascii_byte() {
    for encoding in Encoding::ALL {
        let mut out = Vec::new();
        convert(&[0x41u8][..], encoding.name(), &mut out).unwrap();
        assert_eq!(out, [0x41]);
    }
}

#[test]
fn cp1251_capital_a() {
    let mut out = Vec::new();
    convert(&[0xC0u8][..], "CP1251", &mut out).unwrap();
    assert_eq!(out, [0xD0, 0x90]);
}

#[test]
fn koi8r_last_byte() {
    let mut out = Vec::new();
    convert(&[0xFFu8][..], "KOI8-R", &mut out).unwrap();
    // U+042A CYRILLIC CAPITAL LETTER HARD SIGN
    assert_eq!(out, [0xD0, 0xAA]);
}

#[test]
fn empty_input_is_rejected() {
    let mut out = Vec::new();
    let result = convert(&b""[..], "ISO-8859-5", &mut out);
    assert!(matches!(result, Err(Error::EmptyInput)));
    assert!(out.is_empty());
}

#[test]
fn malformed_encoding_name_is_rejected() {
    let mut out = Vec::new();
    let result = convert(&b"data"[..], "CP-1251", &mut out);
    assert!(matches!(
        result,
        Err(Error::UnsupportedEncoding { ref name }) if name == "CP-1251"
    ));
    assert!(out.is_empty());
}

#[test]
fn mixed_input_preserves_order() {
    let converter = Converter::new(Encoding::Koi8R);
    let input = [b'a', 0xC1, b'b', 0x80, b'c', 0xFF];

    let mut expected = Vec::new();
    for &byte in &input {
        expected.extend_from_slice(&converter.convert(&[byte]));
    }

    assert_eq!(converter.convert(&input), expected);
    assert_eq!(converter.convert_to_string(&input), "aаb─cЪ");
}

#[test]
fn only_cp1251_has_placeholders() {
    for encoding in Encoding::ALL {
        let placeholders = tables::code_page(encoding)
            .iter()
            .filter(|&&cp| cp == REPLACEMENT)
            .count();
        let expected = usize::from(encoding == Encoding::Cp1251);
        assert_eq!(placeholders, expected, "{encoding}");
    }
}
