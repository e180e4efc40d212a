//! Behavioural tests for chat routing, commands, and translation.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::store::PlayerStats;

use super::support::ChatWorld;

type StepResult = Result<(), String>;

#[fixture]
fn world() -> RefCell<ChatWorld> {
    RefCell::new(ChatWorld::new())
}

#[given("the translator renders \"{text}\" as \"{translation}\"")]
fn given_translation(world: &RefCell<ChatWorld>, text: String, translation: String) {
    world.borrow().services.translator.insert(&text, &translation);
}

#[given("the bullet sits in chamber {chamber}")]
fn given_bullet(world: &RefCell<ChatWorld>, chamber: u8) {
    world.borrow_mut().load_bullet(chamber);
}

#[when("\"{login}\" says \"{body}\"")]
fn when_viewer_says(world: &RefCell<ChatWorld>, login: String, body: String) {
    world.borrow_mut().say(&login, &body);
}

#[when("the server sends \"{line}\"")]
fn when_server_sends(world: &RefCell<ChatWorld>, line: String) {
    world.borrow_mut().receive(&line);
}

#[when("the clock advances {seconds} seconds")]
fn when_clock_advances(world: &RefCell<ChatWorld>, seconds: u64) {
    world.borrow_mut().advance(Duration::from_secs(seconds));
}

#[when("the stores are flushed")]
fn when_stores_flushed(world: &RefCell<ChatWorld>) {
    world.borrow_mut().flush();
}

#[then("the bot posts \"{text}\"")]
fn then_bot_posts(world: &RefCell<ChatWorld>, text: String) -> StepResult {
    let posts = world.borrow().posts();
    if posts.contains(&text) {
        Ok(())
    } else {
        Err(format!("'{text}' was not posted; posts: {posts:?}"))
    }
}

#[then("the bot posted {count} messages")]
fn then_bot_posted_count(world: &RefCell<ChatWorld>, count: usize) -> StepResult {
    let posts = world.borrow().posts();
    if posts.len() == count {
        Ok(())
    } else {
        Err(format!("expected {count} posts, got {posts:?}"))
    }
}

#[then("the bot writes \"{line}\"")]
fn then_bot_writes(world: &RefCell<ChatWorld>, line: String) -> StepResult {
    let world = world.borrow();
    if world.written().contains(&line) {
        Ok(())
    } else {
        Err(format!("'{line}' was not written; lines: {:?}", world.written()))
    }
}

#[then("the translator was called {count} times")]
fn then_translator_calls(world: &RefCell<ChatWorld>, count: usize) {
    assert_eq!(world.borrow().services.translator.calls(), count);
}

#[then("the emote store lists \"{emotes}\"")]
fn then_emote_store_lists(world: &RefCell<ChatWorld>, emotes: String) {
    let world = world.borrow();
    let raw = fs::read_to_string(world.stores().paths().emotes()).expect("emote store missing");
    let stored: Vec<String> = serde_json::from_str(&raw).expect("emote store is not JSON");
    let expected: Vec<String> = emotes.split_whitespace().map(str::to_owned).collect();
    assert_eq!(stored, expected);
}

#[then("\"{player}\" survived {survive} times and died {dead} times")]
fn then_player_stats(world: &RefCell<ChatWorld>, player: String, survive: u64, dead: u64) {
    let world = world.borrow();
    assert_eq!(
        world.engine().stores().stats().get(&player),
        PlayerStats { survive, dead }
    );
}

#[scenario(path = "tests/features/chat_commands.feature")]
fn chat_commands(world: RefCell<ChatWorld>) -> Result<(), String> {
    let _ = world;
    Ok(())
}

#[test]
fn stats_document_uses_persisted_shape() {
    let mut world = ChatWorld::new();
    world.load_bullet(1);
    world.say("alice", "!rr");
    world.flush();

    let raw = fs::read_to_string(world.stores().paths().stats()).expect("stats store missing");
    let stored: BTreeMap<String, PlayerStats> =
        serde_json::from_str(&raw).expect("stats store is not JSON");
    assert_eq!(stored.get("alice"), Some(&PlayerStats { survive: 0, dead: 1 }));
}
