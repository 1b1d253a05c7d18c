mod ban;
mod kick;
mod mute;
mod unban;
mod unmute;

use crate::services::permissions::StaffRank;
use crate::services::rate_limit::ModActionKind;
use crate::{Context, Data, Error};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        ban::ban(),
        kick::kick(),
        mute::mute(),
        unmute::unmute(),
        unban::unban(),
    ]
}

/// Admins and staff act without limits; moderators are checked against and
/// recorded in the daily ledger. Replies with the limit message when the
/// quota is exhausted.
pub(crate) async fn check_and_record(
    ctx: &Context<'_>,
    rank: StaffRank,
    kind: ModActionKind,
) -> Result<bool, Error> {
    if rank != StaffRank::Mod {
        return Ok(true);
    }
    let limiter = &ctx.data().rate_limiter;
    if !limiter.may_act(ctx.author().id, kind) {
        ctx.say(format!(
            "❌ Daily {} limit reached ({} per day).",
            kind.verb(),
            limiter.daily_limit()
        ))
        .await?;
        return Ok(false);
    }
    limiter.record(ctx.author().id, kind);
    Ok(true)
}
