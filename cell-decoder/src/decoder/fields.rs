//! Tokenizing and typed field access shared by every line layout.

use crate::band::RadioType;
use crate::cell::Plmn;
use crate::error::LineError;

/// Reported instead of a measurement the modem could not take.
pub const SENTINEL_UNAVAILABLE: i32 = -32768;

/// Undo the quoting artifacts modem output picks up on its way through a shell
/// script and JSON: escaped quotes, escaped line breaks, stray carriage returns.
pub fn unescape(raw: &str) -> String {
    raw.replace("\\r\\n", "\n")
        .replace("\\n", "\n")
        .replace("\\r", "")
        .replace("\\\"", "\"")
        .replace('\r', "")
}

pub fn split_quoted_fields(line: &str) -> Vec<&str> {
    line.split(',')
        .map(|s| s.trim().trim_matches('"').trim())
        .collect()
}

fn is_unavailable(field: &str) -> bool {
    matches!(field, "-" | "" | "--")
}

/// Field-count schema of one line layout. Fields are only indexed after
/// [`Layout::check`] succeeded.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub name: &'static str,
    pub min: usize,
    pub max: usize,
}

impl Layout {
    pub const fn exact(name: &'static str, count: usize) -> Self {
        Self {
            name,
            min: count,
            max: count,
        }
    }

    pub const fn range(name: &'static str, min: usize, max: usize) -> Self {
        Self { name, min, max }
    }

    pub fn check<'a>(&self, fields: &'a [&'a str]) -> Result<Fields<'a>, LineError> {
        if fields.len() < self.min || fields.len() > self.max {
            return Err(LineError::FieldCount {
                layout: self.name,
                min: self.min,
                max: self.max,
                found: fields.len(),
            });
        }
        Ok(Fields { fields })
    }
}

/// Fields of a line that passed its layout check.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    fields: &'a [&'a str],
}

impl<'a> Fields<'a> {
    /// Raw field, empty when an optional trailing field is absent.
    pub fn text(&self, idx: usize) -> &'a str {
        self.fields.get(idx).copied().unwrap_or("")
    }

    /// Required unsigned integer.
    pub fn u32(&self, idx: usize, field: &'static str) -> Result<u32, LineError> {
        self.opt_u32(idx, field)?
            .ok_or_else(|| invalid(field, self.text(idx)))
    }

    pub fn u16(&self, idx: usize, field: &'static str) -> Result<u16, LineError> {
        let value = self.u32(idx, field)?;
        u16::try_from(value).map_err(|_| invalid(field, self.text(idx)))
    }

    /// Unsigned integer where `-` means unavailable.
    pub fn opt_u32(&self, idx: usize, field: &'static str) -> Result<Option<u32>, LineError> {
        let raw = self.text(idx);
        if is_unavailable(raw) {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(|_| invalid(field, raw))
    }

    /// Signed measurement with sentinel normalization: `-` and `-32768` both
    /// become `None`.
    pub fn measurement(&self, idx: usize, field: &'static str) -> Result<Option<i32>, LineError> {
        let raw = self.text(idx);
        if is_unavailable(raw) {
            return Ok(None);
        }
        match raw.parse::<i32>() {
            Ok(SENTINEL_UNAVAILABLE) => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(invalid(field, raw)),
        }
    }

    /// Hex identifier such as a cell ID or TAC, normalized to upper case.
    pub fn hex(&self, idx: usize, field: &'static str) -> Result<Option<String>, LineError> {
        let raw = self.text(idx);
        if is_unavailable(raw) {
            return Ok(None);
        }
        if !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid(field, raw));
        }
        Ok(Some(raw.to_ascii_uppercase()))
    }

    pub fn plmn(&self, mcc_idx: usize, mnc_idx: usize) -> Result<Option<Plmn>, LineError> {
        let mcc = self.text(mcc_idx);
        let mnc = self.text(mnc_idx);
        if is_unavailable(mcc) || is_unavailable(mnc) {
            return Ok(None);
        }
        if mcc.len() != 3 || !mcc.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("mcc", mcc));
        }
        if !(2..=3).contains(&mnc.len()) || !mnc.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("mnc", mnc));
        }
        Ok(Some(Plmn {
            mcc: mcc.to_string(),
            mnc: mnc.to_string(),
        }))
    }
}

fn invalid(field: &'static str, value: &str) -> LineError {
    LineError::InvalidField {
        field,
        value: value.to_string(),
    }
}

/// Parses the `"LTE BAND 3"` / `"NR5G BAND 78"` token of carrier info lines.
pub fn parse_band_token(token: &str) -> Result<(RadioType, u16), LineError> {
    let mut parts = token.split_whitespace();
    let radio = match parts.next().map(str::to_ascii_uppercase).as_deref() {
        Some("LTE") => RadioType::Lte,
        Some("NR5G" | "NR") => RadioType::Nr,
        _ => {
            return Err(LineError::UnknownRadio {
                token: token.to_string(),
            });
        }
    };

    let band = match (parts.next(), parts.next(), parts.next()) {
        (Some(kw), Some(number), None) if kw.eq_ignore_ascii_case("BAND") => {
            number.parse().ok()
        }
        _ => None,
    };
    band.map(|b| (radio, b)).ok_or_else(|| invalid("band", token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_quoted_fields() {
        let line = "\"CONNECT\",\"LTE\",\"FDD\",310,260,\"1234\"";
        let fields = split_quoted_fields(line);
        assert_eq!(fields, vec!["CONNECT", "LTE", "FDD", "310", "260", "1234"]);
    }

    #[test]
    fn unescape_json_artifacts() {
        let raw = "+QENG: \\\"servingcell\\\",\\\"NOCONN\\\"\\r\\n+QCAINFO: x\r\n";
        assert_eq!(
            unescape(raw),
            "+QENG: \"servingcell\",\"NOCONN\"\n+QCAINFO: x\n"
        );
    }

    #[test]
    fn layout_rejects_wrong_field_count() {
        let fields = ["a", "b"];
        let err = Layout::exact("TEST", 3).check(&fields).unwrap_err();
        assert_eq!(
            err,
            LineError::FieldCount {
                layout: "TEST",
                min: 3,
                max: 3,
                found: 2
            }
        );
        assert!(Layout::range("TEST", 1, 2).check(&fields).is_ok());
    }

    #[test]
    fn sentinels_become_none() {
        let raw = ["-", "-32768", "", "-95", "abc"];
        let fields = Layout::exact("TEST", 5).check(&raw).unwrap();
        assert_eq!(fields.measurement(0, "rsrp"), Ok(None));
        assert_eq!(fields.measurement(1, "rsrp"), Ok(None));
        assert_eq!(fields.measurement(2, "rsrp"), Ok(None));
        assert_eq!(fields.measurement(3, "rsrp"), Ok(Some(-95)));
        assert!(fields.measurement(4, "rsrp").is_err());
        // past the end of an optional tail
        assert_eq!(fields.measurement(9, "srxlev"), Ok(None));
    }

    #[test]
    fn required_integers() {
        let raw = ["1300", "-", "70000"];
        let fields = Layout::exact("TEST", 3).check(&raw).unwrap();
        assert_eq!(fields.u32(0, "earfcn"), Ok(1300));
        assert!(fields.u32(1, "earfcn").is_err());
        assert!(fields.u16(2, "band").is_err());
    }

    #[test]
    fn hex_and_plmn() {
        let raw = ["2a1b30b", "7E", "xyz", "310", "260", "31", "01"];
        let fields = Layout::exact("TEST", 7).check(&raw).unwrap();
        assert_eq!(fields.hex(0, "cell_id"), Ok(Some("2A1B30B".to_string())));
        assert_eq!(fields.hex(1, "tac"), Ok(Some("7E".to_string())));
        assert!(fields.hex(2, "tac").is_err());
        assert_eq!(
            fields.plmn(3, 4),
            Ok(Some(Plmn {
                mcc: "310".into(),
                mnc: "260".into()
            }))
        );
        assert!(fields.plmn(5, 6).is_err());
    }

    #[test]
    fn band_tokens() {
        assert_eq!(parse_band_token("LTE BAND 3"), Ok((RadioType::Lte, 3)));
        assert_eq!(parse_band_token("NR5G BAND 78"), Ok((RadioType::Nr, 78)));
        assert!(matches!(
            parse_band_token("WCDMA BAND 1"),
            Err(LineError::UnknownRadio { .. })
        ));
        assert!(matches!(
            parse_band_token("LTE BAND x"),
            Err(LineError::InvalidField { field: "band", .. })
        ));
    }
}
