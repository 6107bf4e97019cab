use calamine::Data;

/// Renders a spreadsheet cell as plain text.
///
/// Missing and empty cells become `""`. Nothing is trimmed; whole-valued
/// floats print without a fractional part, the way spreadsheet integers read
/// back.
pub fn cell_text(cell: Option<&Data>) -> String {
    let Some(cell) = cell else {
        return String::new();
    };

    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(moment) => moment.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}
