use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, space1, u32 as decimal_u32, u64 as decimal_u64},
    combinator::{all_consuming, map, value},
    sequence::{delimited, preceded},
    Parser,
};

use crate::models::{Event, Side};

/// Parse a player name (text enclosed in double quotes)
pub fn quoted_name(input: &str) -> IResult<&str, &str> {
    delimited(
        char('"'),
        take_until("\""),
        char('"')
    ).parse(input)
}

fn steam_id(input: &str) -> IResult<&str, u64> {
    decimal_u64(input)
}

fn playing_side(input: &str) -> IResult<&str, Side> {
    alt((
        value(Side::CounterTerrorist, tag("ct")),
        value(Side::Terrorist, tag("t")),
    )).parse(input)
}

fn any_side(input: &str) -> IResult<&str, Side> {
    alt((
        value(Side::Spectator, tag("spectator")),
        playing_side,
    )).parse(input)
}

/// Either a steam id or `world`
fn killer(input: &str) -> IResult<&str, Option<u64>> {
    alt((
        value(None, tag("world")),
        map(steam_id, Some),
    )).parse(input)
}

/// player 76561198000000001 "name"
fn player(input: &str) -> IResult<&str, Event> {
    map(
        (tag("player"), space1, steam_id, space1, quoted_name),
        |(_, _, steam_id, _, name)| Event::Player { steam_id, name: name.to_string() },
    ).parse(input)
}

/// team 76561198000000001 ct
fn team(input: &str) -> IResult<&str, Event> {
    map(
        (tag("team"), space1, steam_id, space1, any_side),
        |(_, _, steam_id, _, side)| Event::Team { steam_id, side },
    ).parse(input)
}

fn disconnect(input: &str) -> IResult<&str, Event> {
    map(
        preceded((tag("disconnect"), space1), steam_id),
        |steam_id| Event::Disconnect { steam_id },
    ).parse(input)
}

/// kill <attacker|world> <victim>
fn kill(input: &str) -> IResult<&str, Event> {
    map(
        (tag("kill"), space1, killer, space1, steam_id),
        |(_, _, attacker, _, victim)| Event::Kill { attacker, victim },
    ).parse(input)
}

/// damage <attacker> <victim> <amount>
fn damage(input: &str) -> IResult<&str, Event> {
    map(
        (tag("damage"), space1, steam_id, space1, steam_id, space1, decimal_u32),
        |(_, _, attacker, _, victim, _, amount)| Event::Damage { attacker, victim, amount },
    ).parse(input)
}

fn round_end(input: &str) -> IResult<&str, Event> {
    map(
        preceded((tag("round_end"), space1), playing_side),
        |winner| Event::RoundEnd { winner },
    ).parse(input)
}

fn match_end(input: &str) -> IResult<&str, Event> {
    value(Event::MatchEnd, tag("match_end")).parse(input)
}

fn event(input: &str) -> IResult<&str, Event> {
    alt((
        player,
        team,
        disconnect,
        kill,
        damage,
        round_end,
        match_end,
    )).parse(input)
}

/// Decode one trimmed event line. The whole line must be consumed.
pub fn parse_event(line: &str) -> Option<Event> {
    all_consuming(event)
        .parse(line)
        .ok()
        .map(|(_, event)| event)
}

/// #recording <version>
fn header(input: &str) -> IResult<&str, u32> {
    preceded((tag("#recording"), space1), decimal_u32).parse(input)
}

/// Decode the `#recording <version>` header line
pub fn parse_header(line: &str) -> Option<u32> {
    all_consuming(header)
        .parse(line)
        .ok()
        .map(|(_, version)| version)
}
