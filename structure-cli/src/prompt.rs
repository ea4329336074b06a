//! 交互提问
//!
//! 命令流程只依赖 [`Prompter`]：终端、非交互模式和测试脚本各有一个实现，
//! 返回值都是类型化的结果（选项下标、是否确认）。

use colored::Colorize;
use std::collections::VecDeque;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use structure_core::{Result, StructureError};
use tracing::debug;

pub trait Prompter {
    /// 从选项中选择一项，返回下标
    fn choice(&mut self, question: &str, options: &[&str], default: Option<usize>) -> Result<usize>;

    /// 是 / 否确认
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;
}

impl<P: Prompter + ?Sized> Prompter for Box<P> {
    fn choice(&mut self, question: &str, options: &[&str], default: Option<usize>) -> Result<usize> {
        (**self).choice(question, options, default)
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        (**self).confirm(question, default)
    }
}

/// 逐行读取终端输入
///
/// 选择题可以输入序号或完整的选项文本；空输入取默认值；无效输入重新提问；
/// 输入结束（EOF）时取默认值，没有默认值则报错
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self) -> Result<Option<String>> {
        write!(self.output, " > ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn choice(&mut self, question: &str, options: &[&str], default: Option<usize>) -> Result<usize> {
        if options.is_empty() {
            return Err(StructureError::prompt(format!("'{question}' 没有可选项")));
        }
        let default = default.filter(|index| *index < options.len());

        loop {
            match default {
                Some(index) => writeln!(self.output, " {} [{}]:", question.green(), options[index])?,
                None => writeln!(self.output, " {}:", question.green())?,
            }
            for (index, option) in options.iter().enumerate() {
                writeln!(self.output, "  [{index}] {option}")?;
            }

            let Some(answer) = self.read_answer()? else {
                return default.ok_or_else(|| {
                    StructureError::prompt(format!("输入已结束，'{question}' 没有默认选项"))
                });
            };
            if answer.is_empty() {
                if let Some(index) = default {
                    return Ok(index);
                }
                writeln!(self.output, " {}", "A value is required.".red())?;
                continue;
            }
            if let Some(index) = parse_choice(&answer, options) {
                return Ok(index);
            }
            writeln!(self.output, " {}", format!("Value \"{answer}\" is invalid").red())?;
        }
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "yes" } else { "no" };
        loop {
            writeln!(self.output, " {} (yes/no) [{hint}]:", question.green())?;

            let Some(answer) = self.read_answer()? else {
                return Ok(default);
            };
            match answer.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, " {}", "Please answer yes or no.".red())?,
            }
        }
    }
}

// 序号优先，其次是完整的选项文本
fn parse_choice(answer: &str, options: &[&str]) -> Option<usize> {
    answer
        .parse::<usize>()
        .ok()
        .filter(|index| *index < options.len())
        .or_else(|| options.iter().position(|option| *option == answer))
}

/// `--no-interaction`：每个问题都取默认答案
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn choice(&mut self, question: &str, options: &[&str], default: Option<usize>) -> Result<usize> {
        let index = default
            .filter(|index| *index < options.len())
            .ok_or_else(|| StructureError::prompt(format!("非交互模式下无法回答 '{question}'")))?;
        debug!("非交互模式，'{}' 使用默认选项: {}", question, options[index]);
        Ok(index)
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        debug!("非交互模式，'{}' 使用默认答案: {}", question, default);
        Ok(default)
    }
}

/// 预设答案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Choice(usize),
    Confirm(bool),
    /// 取该问题的默认答案
    Default,
}

/// 按顺序回放预设答案，并记录被问到的问题
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// 已经问过的问题
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// 尚未用掉的答案数量
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, question: &str) -> Result<Answer> {
        self.asked.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| StructureError::prompt(format!("没有为 '{question}' 准备答案")))
    }
}

impl Prompter for ScriptedPrompter {
    fn choice(&mut self, question: &str, options: &[&str], default: Option<usize>) -> Result<usize> {
        match self.next_answer(question)? {
            Answer::Choice(index) if index < options.len() => Ok(index),
            Answer::Default => NonInteractive.choice(question, options, default),
            other => Err(StructureError::prompt(format!(
                "'{question}' 的答案无效: {other:?}"
            ))),
        }
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        match self.next_answer(question)? {
            Answer::Confirm(value) => Ok(value),
            Answer::Default => Ok(default),
            other => Err(StructureError::prompt(format!(
                "'{question}' 的答案无效: {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const MENU: [&str; 3] = [
        "Show all tables structure",
        "Show specific table structure",
        "List all tables",
    ];

    fn terminal(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(prompter: &TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.output.clone()).unwrap()
    }

    #[test]
    fn test_choice_by_number_or_text() {
        assert_eq!(terminal("2\n").choice("What?", &MENU, Some(0)).unwrap(), 2);
        assert_eq!(
            terminal("Show specific table structure\n")
                .choice("What?", &MENU, Some(0))
                .unwrap(),
            1
        );
    }

    #[test]
    fn test_choice_empty_and_eof_take_default() {
        assert_eq!(terminal("\n").choice("What?", &MENU, Some(0)).unwrap(), 0);
        assert_eq!(terminal("").choice("What?", &MENU, Some(2)).unwrap(), 2);
    }

    #[test]
    fn test_choice_reasks_on_invalid_input() {
        let mut prompter = terminal("9\nnope\n1\n");
        assert_eq!(prompter.choice("What?", &MENU, Some(0)).unwrap(), 1);

        let text = transcript(&prompter);
        assert!(text.contains("Value \"9\" is invalid"));
        assert!(text.contains("Value \"nope\" is invalid"));
        assert_eq!(text.matches("[0] Show all tables structure").count(), 3);
    }

    #[test]
    fn test_choice_without_default_fails_on_eof() {
        let err = terminal("\n").choice("Select a table:", &["orders", "users"], None).unwrap_err();
        assert!(matches!(err, StructureError::Prompt(_)));
    }

    #[test]
    fn test_confirm_answers() {
        assert!(terminal("y\n").confirm("Continue?", false).unwrap());
        assert!(!terminal("NO\n").confirm("Continue?", true).unwrap());
        assert!(terminal("\n").confirm("Continue?", true).unwrap());
        assert!(!terminal("").confirm("Continue?", false).unwrap());

        let mut prompter = terminal("maybe\nyes\n");
        assert!(prompter.confirm("Continue?", false).unwrap());
        assert!(transcript(&prompter).contains("Please answer yes or no."));
    }

    #[test]
    fn test_non_interactive_uses_defaults() {
        let mut prompter = NonInteractive;
        assert_eq!(prompter.choice("What?", &MENU, Some(0)).unwrap(), 0);
        assert!(prompter.confirm("Migrations?", true).unwrap());
        assert!(!prompter.confirm("Content?", false).unwrap());
        assert!(prompter.choice("Select a table:", &["orders"], None).is_err());
    }

    #[test]
    fn test_scripted_prompter_replays_answers() {
        let mut prompter = ScriptedPrompter::new([Answer::Choice(1), Answer::Default, Answer::Confirm(false)]);

        assert_eq!(prompter.choice("What?", &MENU, Some(0)).unwrap(), 1);
        assert!(prompter.confirm("Migrations?", true).unwrap());
        assert!(!prompter.confirm("Content?", true).unwrap());
        assert_eq!(prompter.asked(), ["What?", "Migrations?", "Content?"]);
        assert_eq!(prompter.remaining(), 0);

        assert!(prompter.confirm("Extra?", true).is_err());
        assert!(
            ScriptedPrompter::new([Answer::Confirm(true)])
                .choice("What?", &MENU, Some(0))
                .is_err()
        );
    }
}
