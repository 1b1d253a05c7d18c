use poise::serenity_prelude as serenity;
use serenity::Mentionable;
use tracing::warn;

/// Posts moderation activity to the configured log channel. With no
/// channel configured every call is a silent no-op; send failures are
/// logged and never propagate to the command path.
pub struct ActionLogService {
    channel_id: Option<serenity::ChannelId>,
}

impl ActionLogService {
    pub fn new(channel_id: Option<serenity::ChannelId>) -> Self {
        Self { channel_id }
    }

    pub async fn log_action(
        &self,
        http: &serenity::Http,
        title: &str,
        moderator: serenity::UserId,
        target: serenity::UserId,
        reason: Option<&str>,
    ) {
        let Some(channel_id) = self.channel_id else {
            return;
        };

        let moderator_name = username(http, moderator).await;
        let target_name = username(http, target).await;

        let mut message = format!(
            "{title}\n**Moderator:** {} ({moderator_name})\n**Target:** {} ({target_name})",
            moderator.mention(),
            target.mention(),
        );
        if let Some(reason) = reason.filter(|r| !r.is_empty()) {
            message.push_str(&format!("\n**Reason:** {reason}"));
        }

        if let Err(e) = channel_id.say(http, message).await {
            warn!("Failed to send action log message: {e:?}");
        }
    }
}

async fn username(http: &serenity::Http, user_id: serenity::UserId) -> String {
    match http.get_user(user_id).await {
        Ok(user) => user.name,
        Err(_) => "Unknown".to_string(),
    }
}
