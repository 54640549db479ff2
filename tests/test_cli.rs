use langlearner::cli::args::{Args, Command, NoteCommand, TagCommand};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn given_no_subcommand_when_parsing_then_fails() {
    // Arrange
    let args = vec!["langlearner", "verbs"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without subcommand");
}

#[test]
fn given_tag_list_without_options_when_parsing_then_uses_defaults() {
    // Arrange
    let args = vec!["langlearner", "tag", "list"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Tag {
            action:
                TagCommand::List {
                    page,
                    page_size,
                    keyword,
                },
        } => {
            assert_eq!(page, 1);
            assert_eq!(page_size, 0);
            assert_eq!(keyword, None);
        }
        _ => panic!("Expected tag list command"),
    }
    assert_eq!(parsed.db, None);
    assert_eq!(parsed.config, None);
}

#[test]
fn given_negative_page_when_parsing_then_accepts_it() {
    // Arrange
    let args = vec!["langlearner", "note", "list", "--page", "-2", "--page-size", "5", "dog"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Note {
            action:
                NoteCommand::List {
                    page,
                    page_size,
                    keyword,
                },
        } => {
            assert_eq!(page, -2);
            assert_eq!(page_size, 5);
            assert_eq!(keyword.as_deref(), Some("dog"));
        }
        _ => panic!("Expected note list command"),
    }
}

#[test]
fn given_note_update_without_back_when_parsing_then_back_is_none() {
    // Arrange
    let args = vec!["langlearner", "note", "update", "3", "hello"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Note {
            action: NoteCommand::Update { id, front, back },
        } => {
            assert_eq!(id, 3);
            assert_eq!(front, "hello");
            assert_eq!(back, None);
        }
        _ => panic!("Expected note update command"),
    }
}

#[test]
fn given_note_tag_command_when_parsing_then_collects_tag_ids() {
    // Arrange
    let args = vec!["langlearner", "note", "tag", "3", "1", "2"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Note {
            action: NoteCommand::Tag { id, tag_ids },
        } => {
            assert_eq!(id, 3);
            assert_eq!(tag_ids, vec![1, 2]);
        }
        _ => panic!("Expected note tag command"),
    }
}

#[test]
fn given_global_db_flag_after_subcommand_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["langlearner", "tag", "delete", "7", "--db", "/tmp/cards.db", "-vv"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.db, Some(PathBuf::from("/tmp/cards.db")));
    assert_eq!(parsed.verbose, 2);
    match parsed.command {
        Command::Tag {
            action: TagCommand::Delete { id },
        } => assert_eq!(id, 7),
        _ => panic!("Expected tag delete command"),
    }
}

#[test]
fn given_non_numeric_id_when_parsing_then_fails() {
    // Arrange
    let args = vec!["langlearner", "tag", "update", "abc", "name"];

    // Act & Assert
    assert!(Args::try_parse_from(args).is_err());
}
