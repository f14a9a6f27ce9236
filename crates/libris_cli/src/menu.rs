//! Interactive console menu over the inventory service.
//!
//! Errors from the service are printed and the loop continues; only I/O
//! failures on the console itself end the session.

use crate::display::{write_book_details, write_book_table};
use libris_core::{Book, BookId, InventoryService, LoanRecord, RecordStore, SearchFilter};
use std::io::{self, BufRead, Write};
use uuid::Uuid;

pub struct Menu<'a, B, L, R, W>
where
    B: RecordStore<Book>,
    L: RecordStore<LoanRecord>,
{
    service: &'a mut InventoryService<B, L>,
    input: R,
    output: W,
}

impl<'a, B, L, R, W> Menu<'a, B, L, R, W>
where
    B: RecordStore<Book>,
    L: RecordStore<LoanRecord>,
    R: BufRead,
    W: Write,
{
    pub fn new(service: &'a mut InventoryService<B, L>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs until the operator chooses exit or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.write_main_menu()?;
            let Some(choice) = self.read_line()? else {
                return Ok(());
            };
            match choice.trim() {
                "1" => self.view_all_books()?,
                "2" => self.add_book()?,
                "3" => self.update_book()?,
                "4" => self.delete_book()?,
                "5" => self.search_books()?,
                "6" => self.lend_book()?,
                "7" => self.return_book()?,
                "8" => self.recommend_books()?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid option. Please try again.")?,
            }
            writeln!(self.output)?;
        }
    }

    fn write_main_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "===== LIBRARY MANAGEMENT SYSTEM =====")?;
        writeln!(self.output, "1. View All Books")?;
        writeln!(self.output, "2. Add New Book")?;
        writeln!(self.output, "3. Update Book")?;
        writeln!(self.output, "4. Delete Book")?;
        writeln!(self.output, "5. Search Books")?;
        writeln!(self.output, "6. Lend Book")?;
        writeln!(self.output, "7. Return Book")?;
        writeln!(self.output, "8. Get Book Recommendations")?;
        writeln!(self.output, "0. Exit")?;
        write!(self.output, "\nEnter your choice: ")?;
        self.output.flush()
    }

    fn view_all_books(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== ALL BOOKS =====")?;
        if self.service.get_all_books().is_empty() {
            return writeln!(self.output, "No books in the library.");
        }
        write_book_table(&mut self.output, self.service.get_all_books())
    }

    fn add_book(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== ADD NEW BOOK =====")?;
        let title = self.prompt("Title: ")?;
        let author = self.prompt("Author: ")?;
        let isbn = self.prompt("ISBN: ")?;
        let genre = self.prompt("Genre: ")?;
        let year = self.prompt("Publication Year: ")?;
        let quantity = self.prompt("Quantity: ")?;

        let Some(quantity) = parse_positive(&quantity) else {
            return writeln!(self.output, "Error: quantity must be a positive number");
        };
        let mut book = Book::new(title, author, quantity);
        book.isbn = isbn;
        book.genre = Some(genre);
        book.publication_year = year.trim().parse().unwrap_or_default();

        match self.service.add_book(book) {
            Ok(_) => writeln!(self.output, "Book added successfully!"),
            Err(err) => writeln!(self.output, "Error: {err}"),
        }
    }

    fn update_book(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== UPDATE BOOK =====")?;
        let Some(mut book) = self.prompt_book()? else {
            return Ok(());
        };
        write_book_details(&mut self.output, &book)?;
        writeln!(
            self.output,
            "\nEnter new details (leave blank to keep current value):"
        )?;

        if let Some(title) = non_blank(self.prompt("Title: ")?) {
            book.title = title;
        }
        if let Some(author) = non_blank(self.prompt("Author: ")?) {
            book.author = author;
        }
        if let Some(isbn) = non_blank(self.prompt("ISBN: ")?) {
            book.isbn = isbn;
        }
        if let Some(genre) = non_blank(self.prompt("Genre: ")?) {
            book.genre = Some(genre);
        }
        if let Ok(year) = self.prompt("Publication Year: ")?.trim().parse() {
            book.publication_year = year;
        }
        if let Some(quantity) = parse_positive(&self.prompt("Quantity: ")?) {
            book.quantity = quantity;
        }

        match self.service.update_book(book) {
            Ok(()) => writeln!(self.output, "Book updated successfully!"),
            Err(err) => writeln!(self.output, "Error: {err}"),
        }
    }

    fn delete_book(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== DELETE BOOK =====")?;
        let Some(book) = self.prompt_book()? else {
            return Ok(());
        };
        write_book_details(&mut self.output, &book)?;
        let answer = self.prompt("\nAre you sure you want to delete this book? (y/n): ")?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            return writeln!(self.output, "Deletion cancelled.");
        }

        match self.service.delete_book(book.id) {
            Ok(()) => writeln!(self.output, "Book deleted successfully!"),
            Err(err) => writeln!(self.output, "Error: {err}"),
        }
    }

    fn search_books(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== SEARCH BOOKS =====")?;
        writeln!(self.output, "Filter by:")?;
        writeln!(self.output, "1. Title")?;
        writeln!(self.output, "2. Author")?;
        writeln!(self.output, "3. ISBN")?;
        writeln!(self.output, "4. Genre")?;
        writeln!(self.output, "5. Available Books Only")?;
        writeln!(self.output, "6. All Fields")?;
        let filter = match self.prompt("\nEnter your choice: ")?.trim() {
            "1" => SearchFilter::Title,
            "2" => SearchFilter::Author,
            "3" => SearchFilter::Isbn,
            "4" => SearchFilter::Genre,
            "5" => SearchFilter::Available,
            _ => SearchFilter::All,
        };

        let term = if filter == SearchFilter::Available {
            String::new()
        } else {
            self.prompt("Enter search term: ")?
        };
        let hits = self.service.search_books(&term, filter);
        if hits.is_empty() {
            return writeln!(
                self.output,
                "No books found matching your search criteria."
            );
        }
        write_book_table(&mut self.output, &hits)
    }

    fn lend_book(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== LEND BOOK =====")?;
        let Some(book) = self.prompt_book()? else {
            return Ok(());
        };
        if !book.is_available() {
            return writeln!(self.output, "No copies available for lending.");
        }
        write_book_details(&mut self.output, &book)?;
        let borrower = self.prompt("\nEnter borrower's name: ")?;

        match self.service.lend_book(book.id, &borrower) {
            Ok(true) => writeln!(self.output, "Book lent successfully!"),
            Ok(false) => writeln!(self.output, "Failed to lend book."),
            Err(err) => writeln!(self.output, "Error: {err}"),
        }
    }

    fn return_book(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== RETURN BOOK =====")?;
        let Some(book) = self.prompt_book()? else {
            return Ok(());
        };
        if book.is_fully_available() {
            return writeln!(self.output, "All copies have already been returned.");
        }
        write_book_details(&mut self.output, &book)?;
        let borrower = self.prompt("\nEnter borrower's name: ")?;

        match self.service.return_book(book.id, &borrower) {
            Ok(true) => writeln!(self.output, "Book returned successfully!"),
            Ok(false) => writeln!(
                self.output,
                "Failed to return book. Check if this borrower has borrowed this book."
            ),
            Err(err) => writeln!(self.output, "Error: {err}"),
        }
    }

    fn recommend_books(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== BOOK RECOMMENDATIONS =====")?;
        let borrower = self.prompt("Enter borrower's name: ")?;
        if borrower.trim().is_empty() {
            return writeln!(self.output, "Borrower name cannot be empty.");
        }

        let picks = self.service.get_recommended_books(&borrower);
        if picks.is_empty() {
            return writeln!(
                self.output,
                "No recommendations available for this borrower."
            );
        }
        writeln!(self.output, "\nRecommended books for {borrower}:")?;
        write_book_table(&mut self.output, &picks)
    }

    /// Reads a book id and resolves it, reporting bad input to the operator.
    fn prompt_book(&mut self) -> io::Result<Option<Book>> {
        let raw = self.prompt("Enter Book ID: ")?;
        let Some(book_id) = parse_book_id(&raw) else {
            writeln!(self.output, "Invalid ID format.")?;
            return Ok(None);
        };
        match self.service.get_book_by_id(book_id) {
            Some(book) => Ok(Some(book.clone())),
            None => {
                writeln!(self.output, "Book not found.")?;
                Ok(None)
            }
        }
    }

    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

fn parse_book_id(value: &str) -> Option<BookId> {
    Uuid::parse_str(value.trim()).ok()
}

fn parse_positive(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok().filter(|quantity| *quantity > 0)
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Menu;
    use libris_core::{Book, InventoryService, LoanRecord, MemoryRecordStore};

    type MemoryInventory =
        InventoryService<MemoryRecordStore<Book>, MemoryRecordStore<LoanRecord>>;

    fn run_script(service: &mut MemoryInventory, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(service, script.as_bytes(), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn service_with_dune() -> (MemoryInventory, String) {
        let mut service =
            InventoryService::new(MemoryRecordStore::new(), MemoryRecordStore::new());
        let id = service.add_book(Book::new("Dune", "Herbert", 1)).unwrap();
        (service, id.to_string())
    }

    #[test]
    fn add_book_flow_creates_book() {
        let mut service =
            InventoryService::new(MemoryRecordStore::new(), MemoryRecordStore::new());

        let output = run_script(
            &mut service,
            "2\nDune\nFrank Herbert\n9780441013593\nScience Fiction\n1965\n2\n0\n",
        );

        assert!(output.contains("Book added successfully!"));
        let book = &service.get_all_books()[0];
        assert_eq!(book.title, "Dune");
        assert_eq!(book.publication_year, 1965);
        assert_eq!(book.available_quantity, 2);
    }

    #[test]
    fn lend_then_return_flow_round_trips() {
        let (mut service, id) = service_with_dune();

        let output = run_script(
            &mut service,
            &format!("6\n{id}\nAlice\n6\n{id}\n7\n{id}\nalice\n0\n"),
        );

        assert!(output.contains("Book lent successfully!"));
        assert!(output.contains("No copies available for lending."));
        assert!(output.contains("Book returned successfully!"));
        assert_eq!(service.get_all_books()[0].available_quantity, 1);
    }

    #[test]
    fn delete_flow_reports_conflict_for_loaned_book() {
        let (mut service, id) = service_with_dune();

        let output = run_script(&mut service, &format!("6\n{id}\nAlice\n4\n{id}\ny\n0\n"));

        assert!(output.contains("Error: cannot delete book"));
        assert_eq!(service.get_all_books().len(), 1);
    }

    #[test]
    fn invalid_input_is_reported_and_loop_continues() {
        let (mut service, _) = service_with_dune();

        let output = run_script(&mut service, "9\n6\nnot-an-id\n1\n");

        assert!(output.contains("Invalid option. Please try again."));
        assert!(output.contains("Invalid ID format."));
        assert!(output.contains("===== ALL BOOKS ====="));
    }

    #[test]
    fn available_search_skips_term_prompt() {
        let (mut service, _) = service_with_dune();

        let output = run_script(&mut service, "5\n5\n0\n");

        assert!(!output.contains("Enter search term"));
        assert!(output.contains("Dune"));
    }
}
