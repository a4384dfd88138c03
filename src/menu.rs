// Console menu - read a choice, dispatch to the session, print the outcome
//
// Generic over the input/output streams so the same loop runs on a
// terminal or on an in-memory script in tests.

use anyhow::{Context, Result};
use rand::Rng;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::config::BankConfig;
use crate::error::{BankError, BankResult};
use crate::session::{AccountSession, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateAccount,
    Deposit,
    Withdraw,
    CheckBalance,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::CreateAccount,
        MenuChoice::Deposit,
        MenuChoice::Withdraw,
        MenuChoice::CheckBalance,
        MenuChoice::Exit,
    ];

    pub fn number(&self) -> u8 {
        match self {
            MenuChoice::CreateAccount => 1,
            MenuChoice::Deposit => 2,
            MenuChoice::Withdraw => 3,
            MenuChoice::CheckBalance => 4,
            MenuChoice::Exit => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::CreateAccount => "Create Account",
            MenuChoice::Deposit => "Deposit Money",
            MenuChoice::Withdraw => "Withdraw Money",
            MenuChoice::CheckBalance => "Check Balance",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = BankError;

    fn from_str(input: &str) -> BankResult<Self> {
        let trimmed = input.trim();
        let number = trimmed.parse::<u8>().ok();
        MenuChoice::ALL
            .into_iter()
            .find(|choice| Some(choice.number()) == number)
            .ok_or_else(|| BankError::InvalidChoice(trimmed.to_string()))
    }
}

/// Parse a decimal amount typed at a prompt.
///
/// Surrounding whitespace is ignored. Text that is not a number, as well
/// as NaN and infinities, is rejected.
pub fn parse_amount(input: &str) -> BankResult<f64> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(BankError::MalformedNumericInput(trimmed.to_string())),
    }
}

/// Render an amount the way the console always has: whole values keep one
/// decimal place ("100.0"), others print in shortest form ("12.5").
/// Magnitudes from 1e7 up, or below 1e-3, switch to "1.0E308" notation.
pub fn format_amount(amount: f64) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = amount.abs();
    if magnitude >= 1e7 || (magnitude != 0.0 && magnitude < 1e-3) {
        let rendered = format!("{:e}", amount);
        let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));
        if mantissa.contains('.') {
            format!("{}E{}", mantissa, exponent)
        } else {
            format!("{}.0E{}", mantissa, exponent)
        }
    } else if amount.fract() == 0.0 {
        format!("{:.1}", amount)
    } else {
        format!("{}", amount)
    }
}

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

pub struct Console<I, O> {
    input: I,
    output: O,
    config: BankConfig,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self::with_config(input, output, BankConfig::default())
    }

    pub fn with_config(input: I, output: O, config: BankConfig) -> Self {
        Console { input, output, config }
    }

    /// Release the streams, e.g. to inspect what was written
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }

    /// Run until Exit is chosen or input ends
    pub fn run<R: Rng>(&mut self, session: &mut AccountSession<R>) -> Result<()> {
        loop {
            self.print_menu()?;
            let line = match self.read_line()? {
                Some(line) => line,
                None => {
                    tracing::info!("input closed, leaving menu loop");
                    return Ok(());
                }
            };

            let flow = match line.parse::<MenuChoice>() {
                Ok(choice) => self.dispatch(choice, session)?,
                Err(e) => {
                    tracing::debug!(input = %line.trim(), "unrecognized menu choice");
                    self.report(&e)?;
                    Flow::Continue
                }
            };

            if flow == Flow::Stop {
                return Ok(());
            }
        }
    }

    fn dispatch<R: Rng>(&mut self, choice: MenuChoice, session: &mut AccountSession<R>) -> Result<Flow> {
        tracing::debug!(choice = choice.label(), "menu command");

        match choice {
            MenuChoice::CreateAccount => {
                let Some(name) = self.prompt("Enter account holder name: ")? else {
                    return Ok(Flow::Stop);
                };
                let Some(initial_deposit) = self.prompt_amount("Enter initial deposit: ")? else {
                    return Ok(Flow::Stop);
                };
                if let Some(initial_deposit) = initial_deposit {
                    // Only the line terminator goes; the name is kept as typed
                    let name = name.trim_end_matches(&['\r', '\n'][..]);
                    let account = session.create_account(name, initial_deposit);
                    let number = account.borrow().number().clone();
                    self.say(&format!("Account created successfully! Account Number: {}", number))?;
                }
            }
            MenuChoice::Deposit => {
                if session.state() == SessionState::NoAccount {
                    self.report(&BankError::NoActiveAccount)?;
                    return Ok(Flow::Continue);
                }
                let Some(amount) = self.prompt_amount("Enter amount to deposit: ")? else {
                    return Ok(Flow::Stop);
                };
                if let Some(amount) = amount {
                    match session.deposit(amount) {
                        Ok(_) => self.say(&format!("Deposited: {}", format_amount(amount)))?,
                        Err(e) => self.report(&e)?,
                    }
                }
            }
            MenuChoice::Withdraw => {
                if session.state() == SessionState::NoAccount {
                    self.report(&BankError::NoActiveAccount)?;
                    return Ok(Flow::Continue);
                }
                let Some(amount) = self.prompt_amount("Enter amount to withdraw: ")? else {
                    return Ok(Flow::Stop);
                };
                if let Some(amount) = amount {
                    match session.withdraw(amount) {
                        Ok(_) => self.say(&format!("Withdrawn: {}", format_amount(amount)))?,
                        Err(e) => self.report(&e)?,
                    }
                }
            }
            MenuChoice::CheckBalance => match session.check_balance() {
                Ok(balance) => self.say(&format!("Current balance: {}", format_amount(balance)))?,
                Err(e) => self.report(&e)?,
            },
            MenuChoice::Exit => {
                self.say("Exiting the banking system. Goodbye!")?;
                return Ok(Flow::Stop);
            }
        }

        Ok(Flow::Continue)
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n{}", self.config.menu_title).context("Failed to write menu")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label()).context("Failed to write menu")?;
        }
        write!(self.output, "Choose an option: ").context("Failed to write menu")?;
        self.output.flush().context("Failed to flush output")?;
        Ok(())
    }

    /// `None` once input is exhausted. Bytes that are not UTF-8 become
    /// U+FFFD, so they fail parsing like any other bad text.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        let read = self.input.read_until(b'\n', &mut bytes).context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;
        self.read_line()
    }

    /// Outer `None`: input ended. Inner `None`: the line was not a number,
    /// already reported.
    fn prompt_amount(&mut self, message: &str) -> Result<Option<Option<f64>>> {
        let Some(line) = self.prompt(message)? else {
            return Ok(None);
        };
        match parse_amount(&line) {
            Ok(amount) => Ok(Some(Some(amount))),
            Err(e) => {
                tracing::debug!(input = %line.trim(), "malformed numeric input");
                self.report(&e)?;
                Ok(Some(None))
            }
        }
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message).context("Failed to write output")?;
        Ok(())
    }

    fn report(&mut self, error: &BankError) -> Result<()> {
        self.say(&error.to_string())
    }
}
