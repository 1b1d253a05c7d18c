pub mod help;
pub mod moderation;
pub mod nickname;
pub mod roles;

use crate::{Data, Error};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    let mut commands = vec![];
    commands.extend(moderation::commands());
    commands.extend(roles::commands());
    commands.extend(nickname::commands());
    commands.push(help::help());
    commands
}
