//! Interactive read-validate-act loop.
//!
//! # Responsibility
//! - Wire console views, validators and the donor service together.
//! - Re-prompt silently on bad input; only explicit exit prints a farewell.
//!
//! # Invariants
//! - Closed input at any prompt ends the session without the exit farewell.
//! - Letter write failures propagate out of `run` unhandled.

use crate::views::Console;
use anyhow::{Context, Result};
use log::{debug, info};
use mailroom_core::{
    parse_donation_amount, title_case, validate_donation_total, validate_email,
    validate_value_exists, DonorCollection, DonorService, LetterOutcome, LetterWriter,
    MenuCommand, MenuManager, MenuSelection, ValidationError,
};
use std::io::{BufRead, Write};

/// Whether the loop keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

pub struct App<R, W, L> {
    service: DonorService<DonorCollection>,
    console: Console<R, W>,
    letters: L,
}

impl<R: BufRead, W: Write, L: LetterWriter> App<R, W, L> {
    pub fn new(
        service: DonorService<DonorCollection>,
        console: Console<R, W>,
        letters: L,
    ) -> Self {
        Self {
            service,
            console,
            letters,
        }
    }

    pub fn service(&self) -> &DonorService<DonorCollection> {
        &self.service
    }

    /// Runs the main menu until the user exits or input closes.
    pub fn run(&mut self) -> Result<()> {
        info!("event=session_start module=cli status=ok");
        while self.main_menu()? == Step::Continue {}
        info!("event=session_end module=cli status=ok");
        Ok(())
    }

    fn main_menu(&mut self) -> Result<Step> {
        let manager = MenuManager::main_menu();
        self.console.open_view("Main Menu")?;
        self.console.print_menu(manager.commands())?;
        self.console.newline()?;

        let Some(input) = self
            .console
            .collect_user_input("Select an item from the menu")?
        else {
            return Ok(input_closed());
        };

        match manager.resolve(&input) {
            MenuSelection::Command(command) => {
                debug!("event=menu_selected module=cli command={command:?}");
                self.dispatch(command)
            }
            MenuSelection::Invalid(_) => {
                debug!("event=menu_selected module=cli status=invalid");
                Ok(Step::Continue)
            }
        }
    }

    fn dispatch(&mut self, command: MenuCommand) -> Result<Step> {
        match command {
            MenuCommand::AddDonation => self.add_donation(),
            MenuCommand::ListDonors => self.list_donors(),
            MenuCommand::DonorReport => self.donor_report(),
            MenuCommand::CreateThankYouLetters => self.create_thank_you_letters(),
            MenuCommand::Exit => self.exit_program(),
        }
    }

    fn add_donation(&mut self) -> Result<Step> {
        self.console.open_view("Add Donation")?;

        let Some(email) = self.prompt_until("Enter the donor's email address", |raw| {
            let email = raw.trim();
            validate_email(email).map(|()| email.to_string())
        })?
        else {
            return Ok(input_closed());
        };

        if self.service.lookup(&email).is_none() {
            let Some(first_name) = self.prompt_name("first")? else {
                return Ok(input_closed());
            };
            let Some(last_name) = self.prompt_name("last")? else {
                return Ok(input_closed());
            };
            self.service
                .register_donor(&email, &first_name, &last_name)
                .context("failed to register donor")?;
            self.console
                .print_content(&format!("{first_name} {last_name} added to Donor Collection"))?;
        }

        let current_total = self
            .service
            .lookup(&email)
            .map_or(0.0, |donor| donor.donation_total());
        let Some(amount) = self.prompt_until("Enter the donation amount", |raw| {
            let amount = parse_donation_amount(raw)?;
            validate_donation_total(current_total, amount)?;
            Ok(amount)
        })?
        else {
            return Ok(input_closed());
        };
        self.service
            .record_donation(&email, amount)
            .context("failed to record donation")?;

        self.console.newline()?;
        if let Some(receipt) = self.service.donation_receipt(&email) {
            self.console.print_content(&receipt)?;
        }
        self.console.newline()?;
        self.pause()
    }

    fn list_donors(&mut self) -> Result<Step> {
        let roster = self.service.donor_roster();
        self.show_report("Donor List", &roster)
    }

    fn donor_report(&mut self) -> Result<Step> {
        let report = self.service.donor_report();
        self.show_report("Donor Report", &report)
    }

    fn create_thank_you_letters(&mut self) -> Result<Step> {
        self.console.open_view("Create Thank You Letters for Donors")?;

        let outcomes = self
            .service
            .write_thank_you_letters(&self.letters)
            .context("failed to write thank-you letters")?;
        for outcome in outcomes {
            let line = match outcome {
                LetterOutcome::Saved { first, last, .. } => {
                    format!("Thank you letter saved for {first} {last}")
                }
                LetterOutcome::Skipped { first, last } => {
                    format!("No donations recorded for {first} {last}; letter skipped")
                }
            };
            self.console.print_content(&line)?;
        }

        self.console.newline()?;
        self.pause()
    }

    fn exit_program(&mut self) -> Result<Step> {
        self.console.print_content("Program Ended Successfully")?;
        Ok(Step::Exit)
    }

    fn show_report(&mut self, view_name: &str, lines: &[String]) -> Result<Step> {
        self.console.open_view(view_name)?;
        self.console.print_lines(lines)?;
        self.console.newline()?;
        self.pause()
    }

    fn pause(&mut self) -> Result<Step> {
        if self.console.pause_screen()? {
            Ok(Step::Continue)
        } else {
            Ok(input_closed())
        }
    }

    fn prompt_name(&mut self, name_type: &str) -> Result<Option<String>> {
        self.prompt_until(&format!("Enter the donor's {name_type} name"), |raw| {
            let name = title_case(raw.trim());
            validate_value_exists(&name).map(|()| name)
        })
    }

    /// Re-prompts until `parse` accepts the input. `None` when input closes.
    fn prompt_until<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<Option<T>> {
        loop {
            let Some(raw) = self.console.collect_user_input(prompt)? else {
                return Ok(None);
            };
            match parse(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(_) => debug!("event=input_rejected module=cli status=retry"),
            }
        }
    }
}

fn input_closed() -> Step {
    info!("event=input_closed module=cli status=ok");
    Step::Exit
}

#[cfg(test)]
mod tests {
    use super::App;
    use crate::views::Console;
    use mailroom_core::{
        load_demo_donors, DonorCollection, DonorRepository, DonorService, FsLetterWriter,
    };
    use std::fs;
    use std::path::Path;

    fn seeded_service() -> DonorService<DonorCollection> {
        let mut collection = DonorCollection::new();
        load_demo_donors(&mut collection).expect("seed demo donors");
        DonorService::new(collection)
    }

    fn run_session(
        service: DonorService<DonorCollection>,
        letters_root: &Path,
        script: &str,
    ) -> (DonorService<DonorCollection>, String) {
        let console = Console::new(script.as_bytes(), Vec::new());
        let mut app = App::new(service, console, FsLetterWriter::new(letters_root));
        app.run().expect("session should end cleanly");
        let App {
            service, console, ..
        } = app;
        let output = String::from_utf8(console.into_output()).expect("utf-8 output");
        (service, output)
    }

    #[test]
    fn exit_prints_confirmation() {
        let temp = tempfile::tempdir().expect("temp dir");
        let (_, output) = run_session(seeded_service(), temp.path(), "E\n");

        assert!(output.contains("Donation Manager - Main Menu"));
        assert!(output.contains("A - Add Donation"));
        assert!(output.contains("Select an item from the menu >>> "));
        assert!(output.ends_with("Program Ended Successfully\n"));
    }

    #[test]
    fn invalid_selection_redraws_menu() {
        let temp = tempfile::tempdir().expect("temp dir");
        let (_, output) = run_session(seeded_service(), temp.path(), "Z\n\na\n E\nE\n");

        assert_eq!(output.matches("Donation Manager - Main Menu").count(), 5);
        assert!(!output.contains("Donation Manager - Add Donation"));
        assert_eq!(output.matches("Program Ended Successfully").count(), 1);
    }

    #[test]
    fn closed_input_ends_session_without_farewell() {
        let temp = tempfile::tempdir().expect("temp dir");
        let (_, output) = run_session(seeded_service(), temp.path(), "");
        assert!(output.ends_with("Select an item from the menu >>> "));
        assert!(!output.contains("Program Ended Successfully"));

        let (service, output) = run_session(seeded_service(), temp.path(), "A\nnew@donor.com\n");
        assert!(output.ends_with("Enter the donor's first name >>> "));
        assert!(!output.contains("Program Ended Successfully"));
        assert!(service.lookup("new@donor.com").is_none());

        let (_, output) = run_session(seeded_service(), temp.path(), "L\n");
        assert!(output.ends_with("Press ENTER to continue"));
        assert!(!output.contains("Program Ended Successfully"));
    }

    #[test]
    fn add_donation_registers_new_donor_after_reprompts() {
        let temp = tempfile::tempdir().expect("temp dir");
        let script = "A\nnot-an-email\njane@doe.com\n\n  jane \nDOE\nabc\n-5\n0\n100\n\nE\n";
        let empty = DonorService::new(DonorCollection::new());
        let (service, output) = run_session(empty, temp.path(), script);

        assert_eq!(
            output
                .matches("Enter the donor's email address >>> ")
                .count(),
            2
        );
        assert_eq!(output.matches("Enter the donor's first name >>> ").count(), 2);
        assert_eq!(output.matches("Enter the donation amount >>> ").count(), 4);
        assert!(output.contains("Jane Doe added to Donor Collection"));
        assert!(output.contains("Dear Jane Doe,"));
        assert!(output.contains("generous donation of $100.00."));
        assert!(output.contains("Press ENTER to continue"));

        let donor = service.lookup("jane@doe.com").expect("donor registered");
        assert_eq!(donor.first_name(), "Jane");
        assert_eq!(donor.last_name(), "Doe");
        assert_eq!(donor.donation_total(), 100.0);
        assert_eq!(donor.donation_count(), 1);
    }

    #[test]
    fn add_donation_for_existing_donor_skips_name_prompts() {
        let temp = tempfile::tempdir().expect("temp dir");
        let script = "A\ntest@test.com\n50\n\nE\n";
        let (service, output) = run_session(seeded_service(), temp.path(), script);

        assert!(!output.contains("Enter the donor's first name"));
        assert!(!output.contains("added to Donor Collection"));
        assert!(output.contains("generous donation of $50.00."));

        let donor = service.lookup("test@test.com").expect("seeded donor");
        assert_eq!(donor.donation_total(), 150.0);
        assert_eq!(donor.donation_count(), 2);
        assert_eq!(service.repo().len(), 5);
    }

    #[test]
    fn add_donation_reprompts_when_total_would_overflow() {
        let temp = tempfile::tempdir().expect("temp dir");
        let script = "A\ntest@test.com\n1e308\n\nA\ntest@test.com\n1e308\n25\n\nE\n";
        let (service, output) = run_session(seeded_service(), temp.path(), script);

        assert_eq!(output.matches("Enter the donation amount >>> ").count(), 3);
        let donor = service.lookup("test@test.com").expect("seeded donor");
        assert_eq!(donor.donation_count(), 3);
        assert!(donor.donation_total().is_finite());
        assert!(!donor.format_summary().contains("inf"));
    }

    #[test]
    fn list_and_report_render_every_donor() {
        let temp = tempfile::tempdir().expect("temp dir");
        let (service, output) = run_session(seeded_service(), temp.path(), "L\n\nD\n\nE\n");

        assert!(output.contains("Donation Manager - Donor List"));
        assert!(output.contains("Donation Manager - Donor Report"));
        for line in service.donor_roster() {
            assert!(output.contains(&line), "missing roster line: {line}");
        }
        for line in service.donor_report() {
            assert!(output.contains(&line), "missing report line: {line}");
        }
        assert!(output.contains("$150.00"));
        assert!(output.contains("$75.00"));
    }

    #[test]
    fn create_letters_writes_one_file_per_donor() {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = temp.path().join("thank_you_messages");
        let (_, output) = run_session(seeded_service(), &root, "C\n\nE\n");

        assert_eq!(output.matches("Thank you letter saved for ").count(), 5);
        assert!(output.contains("Thank you letter saved for Boris Karloff"));

        let karloff_dir = root.join("Karloff_Boris");
        let letters: Vec<_> = fs::read_dir(&karloff_dir)
            .expect("donor letter directory")
            .collect::<Result<_, _>>()
            .expect("list letters");
        assert_eq!(letters.len(), 1);
        let contents = fs::read_to_string(letters[0].path()).expect("read letter");
        assert!(contents.contains("you have generously donated $60.00"));
    }

    #[test]
    fn letter_write_failure_propagates() {
        let temp = tempfile::tempdir().expect("temp dir");
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").expect("write blocker file");

        let console = Console::new(&b"C\n\nE\n"[..], Vec::new());
        let mut app = App::new(seeded_service(), console, FsLetterWriter::new(&blocker));
        let err = app.run().expect_err("unwritable root must fail");
        assert!(format!("{err:#}").contains("failed to write thank-you letters"));
        assert_eq!(app.service().repo().len(), 5);
    }
}
