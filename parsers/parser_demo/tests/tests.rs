use std::fs::File;
use std::io::BufReader;

use parser_demo::{parse_recording, ParseError, Parser, Side};
use pretty_assertions::assert_eq;

fn recording(body: &str) -> String {
    format!("#recording 1\n{}", body)
}

#[test]
fn test_parse_fixture_recording() {
    let file = File::open("tests/fixtures/full_match.rec").expect("Unable to open fixture recording");
    let ended = parse_recording(BufReader::new(file))
        .expect("Fixture should parse")
        .expect("Fixture should end the match");

    assert_eq!(ended.score_ct, 1);
    assert_eq!(ended.score_t, 1);

    let ids: Vec<u64> = ended.participants.iter().map(|p| p.steam_id).collect();
    assert_eq!(ids, vec![76561198000001001, 76561198000001002, 76561198000001003]);

    let alice = &ended.participants[0];
    assert_eq!(alice.name, "alice");
    assert_eq!(alice.kills, 1);
    assert_eq!(alice.deaths, 1);
    assert_eq!(alice.total_damage, 100);

    let carol = &ended.participants[2];
    assert_eq!(carol.kills, 0);
    assert_eq!(carol.deaths, 1);
    assert_eq!(carol.total_damage, 27);
}

#[test]
fn test_handler_sees_scores_at_match_end() {
    let input = recording("player 1 \"a\"\nteam 1 ct\nround_end ct\nround_end ct\nround_end t\nmatch_end\n");
    let mut seen = Vec::new();
    let mut parser = Parser::new(input.as_bytes());
    parser.on_match_ended(|ended| seen.push((ended.score_ct, ended.score_t)));
    parser.parse_to_end().unwrap();
    assert_eq!(parser.game_state().score(Side::CounterTerrorist), 2);
    drop(parser);

    assert_eq!(seen, vec![(2, 1)]);
}

#[test]
fn test_recording_without_match_end() {
    let input = recording("player 1 \"a\"\nround_end t\n");
    assert_eq!(parse_recording(input.as_bytes()).unwrap(), None);
}

#[test]
fn test_missing_header() {
    let result = parse_recording("player 1 \"a\"\n".as_bytes());
    assert!(matches!(result, Err(ParseError::MissingHeader)));

    let result = parse_recording("".as_bytes());
    assert!(matches!(result, Err(ParseError::MissingHeader)));
}

#[test]
fn test_byte_order_mark_before_header() {
    let ended = parse_recording("\u{feff}#recording 1\nround_end t\nmatch_end\n".as_bytes())
        .expect("BOM-prefixed recording should parse");
    assert_eq!(ended.map(|e| e.score_t), Some(1));

    let result = parse_recording("#recording 1\n\u{feff}match_end\n".as_bytes());
    assert!(matches!(result, Err(ParseError::Malformed { line: 2, .. })));
}

#[test]
fn test_unsupported_version() {
    let result = parse_recording("#recording 7\nmatch_end\n".as_bytes());
    assert!(matches!(result, Err(ParseError::UnsupportedVersion(7))));
}

#[test]
fn test_malformed_line_reports_line_number() {
    let input = recording("player 1 \"a\"\n\nexplode 1\nmatch_end\n");
    match parse_recording(input.as_bytes()) {
        Err(ParseError::Malformed { line, text }) => {
            assert_eq!(line, 4);
            assert_eq!(text, "explode 1");
        }
        other => panic!("expected malformed line error, got {:?}", other),
    }
}

#[test]
fn test_invalid_utf8_is_a_decode_error() {
    let mut input = b"#recording 1\nplayer 1 \"".to_vec();
    input.extend_from_slice(&[0xff, 0xfe]);
    input.extend_from_slice(b"\"\n");
    let result = parse_recording(&input[..]);
    assert!(matches!(result, Err(ParseError::Decode { line: 2 })));
}

#[test]
fn test_unknown_player_is_rejected() {
    let input = recording("player 1 \"a\"\nkill 1 2\n");
    let result = parse_recording(input.as_bytes());
    assert!(matches!(result, Err(ParseError::UnknownPlayer { line: 3, steam_id: 2 })));
}
