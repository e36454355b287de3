//! Interactive prompt flow.
//!
//! Reads the same choices the `scan` flags carry, one question at a time.
//! Generic over the reader and writer so tests can script a session.

use super::ScanRequest;
use crate::config::AppSettings;
use crate::error::{CliError, CliResult};
use crate::probe::Protocol;
use crate::scanner::ScanReport;
use crate::types::{TargetMode, TargetSpec};
use console::style;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::path::PathBuf;

/// Question/answer adapter over a line reader and a writer.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl Prompter<BufReader<Stdin>, Stdout> {
    /// Prompt on the terminal.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Print `question` and read one trimmed line.
    ///
    /// End of input reads as an empty answer.
    pub fn ask(&mut self, question: &str) -> CliResult<String> {
        write!(self.writer, "{}", style(question).yellow().bold())?;
        self.writer.flush()?;

        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn say(&mut self, line: impl std::fmt::Display) -> CliResult<()> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    /// Walk the user through mode, input, protocol and thread count.
    ///
    /// Targets are expanded as soon as the mode input is read, so a missing
    /// file or bad range aborts before the protocol question.
    pub fn read_request(&mut self, settings: &AppSettings) -> CliResult<ScanRequest> {
        self.say(style("Welcome to the Host Scanner").cyan().bold())?;
        self.say("Select scanning mode:")?;
        self.say("[1] File with hostnames")?;
        self.say("[2] CIDR range")?;
        self.say("[3] Single domain")?;

        let choice = self.ask("Enter your choice (1/2/3): ")?;
        let mode = TargetMode::from_choice(&choice)
            .ok_or_else(|| CliError::InvalidSelection(format!("scanning mode '{}'", choice)))?;

        let input = match mode {
            TargetMode::File => self.ask("Enter the file name: ")?,
            TargetMode::Cidr => self.ask("Enter the CIDR range (e.g., 192.168.1.0/24): ")?,
            TargetMode::Single => {
                let domain = self.ask("Enter the domain: ")?;
                if domain.is_empty() {
                    return Err(CliError::InvalidSelection("domain must not be empty".into()));
                }
                domain
            }
        };
        let target = TargetSpec::new(mode, input);
        let targets = target.expand()?;

        self.say(style("Select protocol to scan:").cyan().bold())?;
        let mut keys = Vec::new();
        for (key, label) in Protocol::menu() {
            self.say(format!("[{}] {}", key, label))?;
            keys.push(key);
        }

        let choice = self.ask(&format!("Enter your choice ({}): ", keys.join("/")))?;
        let protocol = Protocol::from_choice(&choice)
            .ok_or_else(|| CliError::InvalidSelection(format!("protocol '{}'", choice)))?;

        let answer = self.ask("Enter the number of threads to use: ")?;
        let threads: i64 = answer
            .parse()
            .map_err(|_| CliError::InvalidSelection(format!("thread count '{}'", answer)))?;

        self.say(style(format!("Starting the {} scan...", protocol)).cyan().bold())?;

        Ok(ScanRequest {
            target,
            targets,
            protocol,
            threads,
            timeout: settings.timeout(),
            batch_size: settings.batch_size,
            output: None,
        })
    }

    /// Offer to save a finished report. Only asks when something responded.
    pub fn ask_save(&mut self, report: &ScanReport) -> CliResult<Option<PathBuf>> {
        if report.results.is_empty() {
            return Ok(None);
        }

        let answer = self.ask("Save results to a file? (y/n): ")?;
        if !answer.eq_ignore_ascii_case("y") {
            return Ok(None);
        }

        let path = self.ask("Enter the file name to save: ")?;
        if path.is_empty() {
            return Err(CliError::InvalidSelection("file name must not be empty".into()));
        }
        Ok(Some(PathBuf::from(path)))
    }
}
