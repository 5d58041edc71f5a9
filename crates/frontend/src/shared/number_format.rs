//! Number, size and text formatting for the pt-BR interface

/// Digits grouped with `.` and decimals after `,`
///
/// ```text
/// format_number_with_decimals(1234.567, 2) == "1.234,57"
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{sign}{grouped},{d}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_int(value: u64) -> String {
    format_number_with_decimals(value as f64, 0)
}

/// "R$ 1.234,56"
pub fn format_money(value: f64) -> String {
    format!("R$ {}", format_number_with_decimals(value, 2))
}

/// Percentage already scaled to 0..=100: "87,5%"
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number_with_decimals(value, 1))
}

/// "512 B", "1,5 KB", "3,2 MB"
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{} KB", format_number_with_decimals(bytes as f64 / KB as f64, 1))
    } else {
        format!("{} MB", format_number_with_decimals(bytes as f64 / MB as f64, 1))
    }
}

/// Shorten a filename to `max_len` characters, keeping its extension:
/// "nota_fiscal_eletronica_2024_janeiro.xml" -> "nota_fiscal_eletron...xml"
pub fn truncate_filename(filename: &str, max_len: usize) -> String {
    if filename.chars().count() <= max_len {
        return filename.to_string();
    }
    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => (filename, ""),
    };
    let keep = max_len.saturating_sub(extension.chars().count() + 3).max(1);
    let head: String = stem.chars().take(keep).collect();
    format!("{head}...{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "R$ 1.234,56");
        assert_eq!(format_money(1234567.89), "R$ 1.234.567,89");
        assert_eq!(format_money(0.0), "R$ 0,00");
        assert_eq!(format_money(-1234.56), "R$ -1.234,56");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1.235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1.234,6");
        assert_eq!(format_number_with_decimals(123.0, 0), "123");
        assert_eq!(format_int(1_234_567), "1.234.567");
        assert_eq!(format_percent(87.46), "87,5%");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1,5 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024 + 200 * 1024), "3,2 MB");
    }

    #[test]
    fn test_truncate_filename() {
        assert_eq!(truncate_filename("lei.pdf", 25), "lei.pdf");
        let name = "nota_fiscal_eletronica_2024_janeiro.xml";
        let short = truncate_filename(name, 25);
        assert_eq!(short, "nota_fiscal_eletron...xml");
        assert_eq!(short.chars().count(), 25);
        assert_eq!(truncate_filename("semextensaomuitolonga", 10), "semexte...");
    }
}
