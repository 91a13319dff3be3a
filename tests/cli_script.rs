use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense_core_cli").unwrap();
    cmd.env("EXPENSE_CORE_CLI_SCRIPT", "1")
        .env("EXPENSE_CORE_HOME", home.path());
    cmd
}

#[test]
fn script_mode_records_and_lists_expenses() {
    let home = TempDir::new().unwrap();
    let input = "add Coffee 3.50 Food 2025-02-01\nlist\ntotal\nexit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("2025-02-01: Coffee - $3.50 [Food]"))
        .stdout(contains("Total Expenses: $3.50"));

    let json = std::fs::read_to_string(home.path().join("expenses.json")).unwrap();
    assert!(json.contains("\"Coffee\""));
    assert!(json.contains("\"schema_version\""));
}

#[test]
fn script_mode_reports_per_category_totals_in_a_range() {
    let home = TempDir::new().unwrap();
    let input = "add Rent 800 Housing 2025-02-01\n\
                 add Lunch 12 Food 2025-02-02\n\
                 add Dinner 20 Food 2025-02-03\n\
                 report 2025-02-02 2025-02-03\n\
                 exit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Food: $32.00"))
        .stdout(contains("Housing: $").not());
}

#[test]
fn script_mode_predicts_from_a_linear_trend() {
    let home = TempDir::new().unwrap();
    let input = "add A 10 Misc 2025-02-01\nadd B 20 Misc 2025-02-02\npredict\nexit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Predicted expense for tomorrow:"));
}

#[test]
fn prediction_with_too_little_data_is_reported_not_fatal() {
    let home = TempDir::new().unwrap();

    script_command(&home)
        .write_stdin("predict\nexit\n")
        .assert()
        .success()
        .stdout(contains("Not enough data to make a prediction"));
}

#[test]
fn bad_commands_report_errors_and_keep_the_session_alive() {
    let home = TempDir::new().unwrap();
    let input = "add OnlyTwo 5\nadd Late 5 Misc 02/01/2025\ntotal\nexit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Usage: add <description> <amount> <category> [date]"))
        .stdout(contains("Invalid date `02/01/2025`"))
        .stdout(contains("Total Expenses: $0.00"));
}

#[test]
fn end_bound_alone_uses_dash_placeholder() {
    let home = TempDir::new().unwrap();
    let input = "add Early 10 Misc 2025-01-01\n\
                 add Late 20 Misc 2025-03-01\n\
                 total - 2025-01-31\n\
                 exit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Total Expenses: $10.00"));
}
