//! Line-oriented interaction shell.
//!
//! Presents the numbered menu, reads raw lines for book fields, calls into
//! [`Inventory`] and prints results. Every [`InventoryError`] is reported and
//! the menu is shown again; only I/O failures end the loop early.
use anyhow::{Context as _, Result};
use std::io::{BufRead, Write};

use crate::error::InventoryError;
use crate::inventory::Inventory;

/// Menu entries, numbered as shown to the user.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    ViewAvailable,
    BorrowBook,
    ReturnBook,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::AddBook,
        MenuChoice::ViewAvailable,
        MenuChoice::BorrowBook,
        MenuChoice::ReturnBook,
        MenuChoice::Exit,
    ];

    /// Parse a menu line. Surrounding whitespace is ignored.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().parse::<u32>().ok()? {
            1 => Some(Self::AddBook),
            2 => Some(Self::ViewAvailable),
            3 => Some(Self::BorrowBook),
            4 => Some(Self::ReturnBook),
            5 => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn number(self) -> u32 {
        match self {
            Self::AddBook => 1,
            Self::ViewAvailable => 2,
            Self::BorrowBook => 3,
            Self::ReturnBook => 4,
            Self::Exit => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AddBook => "Add Book",
            Self::ViewAvailable => "View Available Books",
            Self::BorrowBook => "Borrow Book",
            Self::ReturnBook => "Return Book",
            Self::Exit => "Exit",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu loop bound to one inventory and one input/output pair.
pub struct Shell<'a, R, W> {
    inventory: &'a mut Inventory,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(inventory: &'a mut Inventory, input: R, output: W) -> Self {
        Self { inventory, input, output }
    }

    /// Run until the user picks Exit or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };
            let flow = match MenuChoice::parse(&line) {
                Some(MenuChoice::AddBook) => self.add_book()?,
                Some(MenuChoice::ViewAvailable) => self.view_available()?,
                Some(MenuChoice::BorrowBook) => self.borrow_book()?,
                Some(MenuChoice::ReturnBook) => self.return_book()?,
                Some(MenuChoice::Exit) => Flow::Exit,
                None => {
                    tracing::debug!(input = %line, "unrecognized menu choice");
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }
        writeln!(self.output, "Exiting the Library Management System. Goodbye!")?;
        self.output.flush().context("flush shell output")
    }

    /// Give back the reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Library Management System:")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }
        self.prompt("Choose an option: ")
    }

    fn add_book(&mut self) -> Result<Flow> {
        let Some(id) = self.ask("Enter Book ID: ")? else { return Ok(Flow::Exit) };
        let Some(title) = self.ask("Enter Book Title: ")? else { return Ok(Flow::Exit) };
        let Some(author) = self.ask("Enter Book Author: ")? else { return Ok(Flow::Exit) };

        match self.inventory.add_book(&id, &title, &author) {
            Ok(book) => {
                writeln!(self.output, "Book successfully added: {book}")?;
                writeln!(self.output)?;
                writeln!(self.output, "The book has been successfully added. Here are its details:")?;
                writeln!(self.output, "{book}")?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn view_available(&mut self) -> Result<Flow> {
        writeln!(self.output, "Available Books:")?;
        for book in self.inventory.list_available() {
            writeln!(self.output, "{book}")?;
        }
        Ok(Flow::Continue)
    }

    fn borrow_book(&mut self) -> Result<Flow> {
        let Some(id) = self.ask("Enter Book ID to borrow: ")? else { return Ok(Flow::Exit) };
        match self.inventory.borrow_book(&id) {
            Ok(book) => writeln!(self.output, "You have successfully borrowed the book: {book}")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn return_book(&mut self) -> Result<Flow> {
        let Some(id) = self.ask("Enter Book ID to return: ")? else { return Ok(Flow::Exit) };
        match self.inventory.return_book(&id) {
            Ok(book) => writeln!(self.output, "Thank you for returning the book: {book}")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: &InventoryError) -> Result<()> {
        tracing::debug!(code = err.code(), kind = err.kind(), "operation rejected");
        writeln!(self.output, "Error: {err}")?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush().context("flush prompt")
    }

    fn ask(&mut self, text: &str) -> Result<Option<String>> {
        self.prompt(text)?;
        let line = self.read_line()?;
        if line.is_none() {
            writeln!(self.output)?;
        }
        Ok(line)
    }

    /// Next raw line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        let n = self.input.read_line(&mut buf).context("read from input")?;
        if n == 0 {
            return Ok(None);
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }
}
