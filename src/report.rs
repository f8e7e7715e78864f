use crate::tasks::TaskRow;
use comfy_table::Table;
use std::io::{self, Write};

/// Plain ASCII borders with a rule under the header and none between rows.
const TABLE_PRESET: &str = "||--+-++|    ++++++";

const TASK_COLUMNS: [&str; 4] = ["Task ID", "Task Definition", "Status", "Image Tag"];

/// Writes the report lines and the task table to any sink.
pub struct Report<W> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// A `label: value` line.
    pub fn field(&mut self, label: &str, value: &str) -> io::Result<()> {
        writeln!(self.out, "{label}: {value}")
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn services(&mut self, services: &[String]) -> io::Result<()> {
        for service in services {
            writeln!(self.out, "{service}")?;
        }
        Ok(())
    }

    pub fn task_table(&mut self, rows: &[TaskRow]) -> io::Result<()> {
        let mut table = Table::new();
        table.load_preset(TABLE_PRESET).set_header(TASK_COLUMNS);
        for row in rows {
            table.add_row([
                row.task_id.as_str(),
                row.task_definition.as_str(),
                row.status.as_str(),
                row.image_tag.as_deref().unwrap_or("-"),
            ]);
        }
        writeln!(self.out, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(rows: &[TaskRow]) -> String {
        let mut report = Report::new(Vec::new());
        report.task_table(rows).unwrap();
        String::from_utf8(report.into_inner()).unwrap()
    }

    #[test]
    fn table_layout() {
        let rows = vec![
            TaskRow {
                task_id: "a1b2".into(),
                task_definition: "web:12".into(),
                status: "RUNNING".into(),
                image_tag: Some("v2".into()),
            },
            TaskRow {
                task_id: "c3d4".into(),
                task_definition: "web:12".into(),
                status: "PROVISIONING".into(),
                image_tag: None,
            },
        ];

        let expected = "\
+---------+-----------------+--------------+-----------+
| Task ID | Task Definition | Status       | Image Tag |
+---------+-----------------+--------------+-----------+
| a1b2    | web:12          | RUNNING      | v2        |
| c3d4    | web:12          | PROVISIONING | -         |
+---------+-----------------+--------------+-----------+
";
        assert_eq!(render(&rows), expected);
    }

    #[test]
    fn empty_table_keeps_header() {
        let out = render(&[]);
        let header = "| Task ID | Task Definition | Status | Image Tag |";
        assert!(out.contains(header));
        let rows = out.lines().filter(|line| line.starts_with("| ")).count();
        assert_eq!(rows, 1);
    }

    #[test]
    fn fields_and_services() {
        let mut report = Report::new(Vec::new());
        report.field("cluster name", "prod").unwrap();
        report.services(&["api".into(), "web".into()]).unwrap();
        let out = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(out, "cluster name: prod\napi\nweb\n");
    }
}
