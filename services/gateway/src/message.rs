//! Announcement text
//!
//! Slack mrkdwn: `<@U123>` renders as a mention of that user.

use types::ids::{Participant, ParticipantId};
use types::matching::Matching;

pub const PROMPT_INTRO: &str =
    "If you're really out of ideas, here's how you can start the conversation:";

pub const OUT_OF_PAIRS: &str = "We're out of scheduled chats! Time to do this again?";

/// `Name (<@ID>)`, or the bare mention when the name is unknown
pub fn mention(id: &ParticipantId, participants: &[Participant]) -> String {
    match participants.iter().find(|p| p.id == *id) {
        Some(p) => format!("{} (<@{}>)", p.name, id),
        None => format!("<@{}>", id),
    }
}

/// Header, one line per pair, then the optional conversation prompt
pub fn format_announcement(
    header: &str,
    matching: &Matching,
    participants: &[Participant],
    prompt: Option<&str>,
) -> String {
    let mut lines = vec![header.to_string()];
    lines.extend(matching.pairs().iter().map(|pair| {
        format!(
            "{} and {}",
            mention(pair.first(), participants),
            mention(pair.second(), participants)
        )
    }));

    if let Some(prompt) = prompt {
        lines.push(String::new());
        lines.push(PROMPT_INTRO.to_string());
        lines.push(prompt.to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::pair::PairKey;

    fn people() -> Vec<Participant> {
        vec![
            Participant::new("U1", "Ada"),
            Participant::new("U2", "Brian"),
            Participant::new("U3", "Chen"),
            Participant::new("U4", "Dana"),
        ]
    }

    #[test]
    fn test_mention_format() {
        assert_eq!(mention(&"U1".into(), &people()), "Ada (<@U1>)");
        assert_eq!(mention(&"U9".into(), &people()), "<@U9>");
    }

    #[test]
    fn test_announcement_with_prompt() {
        let matching = Matching::from_pairs(vec![
            PairKey::new("U3", "U1").unwrap(),
            PairKey::new("U2", "U4").unwrap(),
        ]);
        let text = format_announcement(
            "Coffee chats this week:",
            &matching,
            &people(),
            Some("What are you reading?"),
        );

        assert_eq!(
            text,
            "Coffee chats this week:\n\
             Chen (<@U3>) and Ada (<@U1>)\n\
             Brian (<@U2>) and Dana (<@U4>)\n\
             \n\
             If you're really out of ideas, here's how you can start the conversation:\n\
             What are you reading?"
        );
    }

    #[test]
    fn test_announcement_without_prompt() {
        let matching = Matching::from_pairs(vec![PairKey::new("U1", "U2").unwrap()]);
        let text = format_announcement("Header", &matching, &people(), None);
        assert_eq!(text, "Header\nAda (<@U1>) and Brian (<@U2>)");
    }
}
