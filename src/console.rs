//! Interactive menu over any line-based input and text output.
//!
//! Reads one command at a time. Invalid menu input redisplays the same menu;
//! a malformed amount is reported and returns to the main menu. End of input
//! ends the session.

use crate::amount::Amount;
use crate::error::Result;
use crate::payment::Category;
use crate::store::{InMemoryStore, PaymentStore};
use crate::workflow::{PaymentKind, PaymentRequest, PaymentWorkflow};
use log::{debug, warn};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Whether the session continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Console front end for a `PaymentWorkflow`.
pub struct Console<R: BufRead, W: Write, S: PaymentStore = InMemoryStore> {
    workflow: PaymentWorkflow<S>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write, S: PaymentStore> Console<R, W, S> {
    pub fn new(workflow: PaymentWorkflow<S>, input: R, output: W) -> Self {
        Console {
            workflow,
            input,
            output,
        }
    }

    /// Consumes the console, returning the workflow it drove.
    pub fn into_workflow(self) -> PaymentWorkflow<S> {
        self.workflow
    }

    /// Runs the main menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "PAYMENT APP")?;
            writeln!(self.output, "1. New Payment")?;
            writeln!(self.output, "2. Check Status")?;
            writeln!(self.output, "3. Exit")?;

            let Some(choice) = self.prompt("Choose option: ")? else {
                debug!("Input closed, ending session");
                writeln!(self.output)?;
                return Ok(());
            };

            let flow = match choice.as_str() {
                "1" => self.new_payment()?,
                "2" => self.check_status()?,
                "3" => {
                    writeln!(self.output, "Thank you for using our service!")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid choice")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                writeln!(self.output)?;
                return Ok(());
            }
        }
    }

    fn new_payment(&mut self) -> Result<Flow> {
        let category = loop {
            writeln!(self.output)?;
            writeln!(self.output, "PAYMENT OPTIONS:")?;
            for (num, category) in Category::ALL.iter().enumerate() {
                writeln!(self.output, "{}. {}", num + 1, category.title())?;
            }

            let Some(choice) = self.prompt("Select payment type: ")? else {
                return Ok(Flow::Quit);
            };

            match Category::from_menu_choice(&choice) {
                Some(category) => break category,
                None => writeln!(self.output, "Invalid choice")?,
            }
        };

        match category {
            Category::Mobile => self.mobile_payment(),
            Category::Movie => self.movie_payment(),
            Category::Upi => self.upi_payment(),
        }
    }

    fn mobile_payment(&mut self) -> Result<Flow> {
        writeln!(self.output)?;
        writeln!(self.output, "MOBILE RECHARGE")?;

        let Some(amount) = self.prompt_amount("Enter amount: ₹")? else {
            return Ok(Flow::Quit);
        };
        let Some(amount) = amount else {
            return Ok(Flow::Continue);
        };
        let Some(number) = self.prompt("Enter mobile number: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(operator) = self.prompt("Enter operator: ")? else {
            return Ok(Flow::Quit);
        };

        let request = PaymentRequest::new(amount, PaymentKind::MobileRecharge { number, operator });
        self.submit(&request, "Payment created!")
    }

    fn movie_payment(&mut self) -> Result<Flow> {
        writeln!(self.output)?;
        writeln!(self.output, "MOVIE TICKET")?;

        let Some(movie) = self.prompt("Enter movie name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(theater) = self.prompt("Enter theater: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(amount) = self.prompt_amount("Enter ticket price: ₹")? else {
            return Ok(Flow::Quit);
        };
        let Some(amount) = amount else {
            return Ok(Flow::Continue);
        };

        let request = PaymentRequest::new(amount, PaymentKind::MovieTicket { movie, theater });
        self.submit(&request, "Booking created!")
    }

    fn upi_payment(&mut self) -> Result<Flow> {
        writeln!(self.output)?;
        writeln!(self.output, "UPI TRANSFER")?;

        let Some(upi_id) = self.prompt("Enter UPI ID: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(amount) = self.prompt_amount("Enter amount: ₹")? else {
            return Ok(Flow::Quit);
        };
        let Some(amount) = amount else {
            return Ok(Flow::Continue);
        };
        let Some(note) = self.prompt("Enter note (optional): ")? else {
            return Ok(Flow::Quit);
        };

        let request = PaymentRequest::new(amount, PaymentKind::UpiTransfer { upi_id, note });
        self.submit(&request, "Transfer initiated!")
    }

    /// Records the payment and offers to process it straight away.
    fn submit(&mut self, request: &PaymentRequest, banner: &str) -> Result<Flow> {
        let id = match self.workflow.submit(request) {
            Ok(id) => id,
            Err(e) => {
                warn!("Could not create payment: {}", e);
                writeln!(self.output, "Payment could not be created: {}", e)?;
                return Ok(Flow::Continue);
            }
        };

        writeln!(self.output)?;
        writeln!(self.output, "{} ID: {}", banner, id)?;

        let Some(answer) = self.prompt("Process payment now? (y/n): ")? else {
            return Ok(Flow::Quit);
        };

        if answer.eq_ignore_ascii_case("y") {
            if let Some(status) = self.workflow.process(id.as_str()) {
                writeln!(self.output, "Payment {}!", status)?;
                self.show_receipt(id.as_str())?;
            }
        }

        Ok(Flow::Continue)
    }

    fn check_status(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt("Enter payment ID: ")? else {
            return Ok(Flow::Quit);
        };

        if !self.show_receipt(&id)? {
            writeln!(self.output, "Payment not found")?;
        }

        Ok(Flow::Continue)
    }

    /// Prints the receipt for a payment. Returns `false` if it does not exist.
    fn show_receipt(&mut self, id: &str) -> Result<bool> {
        match self.workflow.receipt(id)? {
            Some(receipt) => {
                writeln!(self.output)?;
                write!(self.output, "{}", receipt)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Prompts for an amount.
    ///
    /// Outer `None` means input ended; inner `None` means the text was not a
    /// valid amount and the error has already been reported.
    fn prompt_amount(&mut self, message: &str) -> Result<Option<Option<Amount>>> {
        let Some(text) = self.prompt(message)? else {
            return Ok(None);
        };

        match Amount::from_str(&text) {
            Ok(amount) => Ok(Some(Some(amount))),
            Err(e) => {
                debug!("Rejected amount input: {}", e);
                writeln!(self.output, "{}", e)?;
                Ok(Some(None))
            }
        }
    }

    /// Writes a prompt and reads one trimmed line. Returns `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced, so such a line reads as
    /// ordinary invalid input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }
}
