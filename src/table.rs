//! Plain ASCII table rendering for probe output.

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let mut output = String::new();
    output.push_str(&format_row(headers, &widths));
    output.push('\n');

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat((*w).max(3))).collect();
    output.push_str(&format_row(&separator, &widths));
    output.push('\n');

    for row in rows {
        output.push_str(&format_row(row, &widths));
        output.push('\n');
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate().take(widths.len()) {
        if idx > 0 {
            line.push_str("  ");
        }
        let sanitized: String = cell
            .chars()
            .map(|ch| match ch {
                '\n' | '\r' | '\t' => ' ',
                other => other,
            })
            .collect();
        let width = widths[idx].max(sanitized.chars().count());
        line.push_str(&sanitized);
        for _ in sanitized.chars().count()..width {
            line.push(' ');
        }
    }
    let trimmed_len = line.trim_end_matches(' ').len();
    line.truncate(trimmed_len);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn columns_align_to_widest_cell() {
        let rendered = render_table(
            &strings(&["name", "type"]),
            &[strings(&["id", "integer"]), strings(&["comment", "string"])],
        );
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "name     type");
        assert_eq!(lines[2], "id       integer");
        assert_eq!(lines[3], "comment  string");
    }

    #[test]
    fn control_characters_render_as_spaces() {
        let rendered = render_table(&strings(&["v"]), &[strings(&["a\nb"])]);
        assert!(rendered.contains("a b"));
    }
}
