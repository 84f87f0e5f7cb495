use bluebill::app::Application;
use bluebill::config::Config;
use bluebill::{CommandContext, CommandProcessor, Region, TextBuffer};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn run(name: &str, text: &str, selections: &[Region]) -> (TextBuffer, bluebill::CommandOutcome) {
    let mut buffer = TextBuffer::new(text);
    if !selections.is_empty() {
        buffer.set_selections(selections.iter().copied()).unwrap();
    }
    let config = Config::default();
    let now = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap().and_hms_opt(7, 5, 0).unwrap();
    let outcome = CommandProcessor::new()
        .execute(name, &mut CommandContext::new(&mut buffer, &config, now))
        .unwrap();
    (buffer, outcome)
}

#[test]
fn test_time_parsing_over_several_selections() {
    let text = "T: 0900 - 1000\nT: 1300 - 1330\n";
    let (buffer, outcome) = run("time_parsing", text, &[Region::new(0, 14), Region::new(15, 29)]);

    assert_eq!(outcome.edits, 2);
    assert_eq!(
        buffer.text(),
        "T: 0900 - 1000\n0900 - 1000 (1h0m -> 1.00h -> 3600s)\nT: 1300 - 1330\n1300 - 1330 (0h30m -> 0.50h -> 1800s)\n"
    );
}

#[test]
fn test_one_bad_selection_does_not_stop_the_rest() {
    let text = "T: 9am - 10am\nT: 25pm - 1pm\nT: 2pm - 3pm";
    let (buffer, outcome) =
        run("time_parsing_standard", text, &[Region::new(0, 13), Region::new(14, 27), Region::new(28, 40)]);

    assert_eq!(outcome.edits, 2);
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].contains("2500pm"));
    assert_eq!(
        buffer.text(),
        "T: 9am - 10am\n09:00AM - 10:00AM (1h0m -> 1.00h -> 3600s)\nT: 25pm - 1pm\nT: 2pm - 3pm\n02:00PM - 03:00PM (1h0m -> 1.00h -> 3600s)"
    );
}

#[test]
fn test_insert_date_and_time_use_the_clock() {
    let (buffer, _) = run("insert_date", "Date: ", &[Region::cursor(6)]);
    assert_eq!(buffer.text(), "Date: 2024-02-29");

    let (buffer, _) = run("insert_time", "at ", &[Region::cursor(3)]);
    assert_eq!(buffer.text(), "at 0705");
}

#[test]
fn test_insert_uuid() {
    let (buffer, outcome) = run("insert_uuid", "", &[]);
    assert_eq!(outcome.edits, 1);
    let id = uuid::Uuid::parse_str(buffer.text()).unwrap();
    assert_eq!(id.get_version_num(), 4);
}

#[test]
fn test_create_todo_then_select_gaps() {
    let app = Application::new(Config::default());
    let (buffer, outcome) = app
        .run_command("create_todo", "- milk\n\n- eggs".to_string(), &[], &[1, 3])
        .unwrap();
    assert!(outcome.is_success());
    assert_eq!(buffer.text(), "- [] milk\n\n- [] eggs");

    let (buffer, outcome) = app.run_command("select_empty_lines", buffer.into_text(), &[], &[]).unwrap();
    assert_eq!(buffer.selections(), &[Region::cursor(10)]);
    assert_eq!(outcome.messages, vec!["1 empty lines selected."]);
}

#[test]
fn test_open_links_resolves_markdown_target() {
    let (buffer, outcome) = run("open_links", "read [the doc](notes/a%20b.md) later", &[Region::cursor(8)]);
    assert_eq!(outcome.messages, vec!["notes/a b.md"]);
    assert_eq!(buffer.text(), "read [the doc](notes/a%20b.md) later");
}
