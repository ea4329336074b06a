use colored::Colorize;
use std::io::Write;
use structure_core::Result;
use structure_core::constants::display;

/// 命令输出
///
/// 所有面向用户的结果都写到这里，日志走 tracing（stderr），两者互不干扰
pub struct Console<W> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// 标题、汇总等提示信息
    pub fn info(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text.green())?;
        Ok(())
    }

    /// 普通文本
    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    pub fn warn(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text.yellow())?;
        Ok(())
    }

    pub fn error(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text.red())?;
        Ok(())
    }

    pub fn new_line(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    /// 80 列分隔线
    pub fn divider(&mut self) -> Result<()> {
        let line: String = std::iter::repeat_n(display::DIVIDER_CHAR, display::DIVIDER_WIDTH).collect();
        self.line(&line)
    }

    /// 以边框表格输出，列宽取表头和单元格中最长者
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let border = table_border(&widths);
        writeln!(self.out, "{border}")?;
        self.table_row(&widths, headers.iter().copied())?;
        writeln!(self.out, "{border}")?;
        for row in rows {
            self.table_row(&widths, row.iter().map(String::as_str))?;
        }
        writeln!(self.out, "{border}")?;
        Ok(())
    }

    fn table_row<'a>(&mut self, widths: &[usize], cells: impl Iterator<Item = &'a str>) -> Result<()> {
        let mut line = String::from("|");
        let mut cells = cells;
        for width in widths {
            let cell = cells.next().unwrap_or_default();
            let padding = width - cell.chars().count().min(*width);
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(padding));
            line.push_str(" |");
        }
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

fn table_border(widths: &[usize]) -> String {
    let mut border = String::from("+");
    for width in widths {
        border.push_str(&"-".repeat(width + 2));
        border.push('+');
    }
    border
}
