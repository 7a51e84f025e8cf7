//! Prompt templates for each decision a player makes

use crate::core::player::{PlayerId, join_players};
use crate::game::PublicView;
use crate::roles::Role;

/// Everything a single player may see when asked for a decision
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub player: &'a PlayerId,
    pub role: Role,
    /// Players this player knows to be evil
    pub known_evil: &'a [PlayerId],
    pub view: &'a PublicView,
    /// This player's own notes from earlier decisions
    pub private_notes: &'a str,
    /// Public messages of the current round so far
    pub conversation: &'a str,
}

/// Templates for generating prompts at each stage of a round
pub struct PromptTemplate;

impl PromptTemplate {
    /// Short rules reference included in every prompt
    pub fn rules_summary() -> &'static str {
        r#"- Five players: Merlin and two Loyal Servants are good; the Assassin and the Minion are evil.
- Each round the leader proposes a quest team. Everyone votes to approve or reject it.
- A team needs a strict majority of approvals. Five rejected proposals in a row and evil wins.
- Approved team members secretly play quest cards. Good players must play success.
  Evil players may play success or fail. A single fail card fails the quest.
- Team sizes for quests 1 to 5 are 2, 3, 2, 3, 3. The first side to three quests wins the quest phase.
- If good wins three quests, the Assassin names one player. If that player is Merlin, evil wins."#
    }

    /// Discussion turn: private reasoning followed by a public message
    pub fn discussion(ctx: &PromptContext<'_>) -> String {
        let mut prompt = Self::preamble(ctx);
        prompt.push_str(&format!(
            r#"GAME RULES (for reference):
{}

---

{}

---

It is now your turn to speak.

First, write any private thoughts or strategy considerations you want to keep to yourself.
Then, write your public message to the group inside XML tags.

Format:
[Your private thoughts here - other players will NOT see this]

<MESSAGE>
Your public message to the group here
</MESSAGE>

Your response:"#,
            Self::rules_summary(),
            Self::shared_sections(ctx),
        ));
        prompt
    }

    /// Team proposal by the current leader
    pub fn proposal(ctx: &PromptContext<'_>, team_size: usize) -> String {
        let mut prompt = Self::preamble(ctx);
        prompt.push_str(&format!(
            r#"{}

---

You are the leader for this round. Propose a team of exactly {} players.
You may include yourself. Use the exact player names listed above.

Write your reasoning, then end with the team in XML tags, names separated by commas:
<PROPOSED_TEAM>Name1, Name2</PROPOSED_TEAM>

Your private thoughts:"#,
            Self::shared_sections(ctx),
            team_size,
        ));
        prompt
    }

    /// Private vote on the proposed team
    pub fn vote(ctx: &PromptContext<'_>, team: &[PlayerId]) -> String {
        let mut prompt = Self::preamble(ctx);
        prompt.push_str(&format!(
            r#"{}

---

Proposed team: {}

Now you must make a PRIVATE decision about how to vote on the proposed team.

Write your reasoning about:
1. Who are the minions and who is Merlin?
2. Will you vote to accept or reject the team proposed by the leader? Why

End your thoughts with your vote in XML tags:
<VOTE>approve</VOTE> or <VOTE>reject</VOTE>

Your private thoughts:"#,
            Self::shared_sections(ctx),
            join_players(team),
        ));
        prompt
    }

    /// Private quest card for a member of an approved team
    pub fn quest_card(ctx: &PromptContext<'_>, team: &[PlayerId]) -> String {
        let mut prompt = Self::preamble(ctx);
        prompt.push_str(&format!(
            r#"{}

---

Quest team: {}

You are on the quest team. Now you must PRIVATELY decide which quest card to play.

"#,
            Self::shared_sections(ctx),
            join_players(team),
        ));

        if ctx.role.may_fail_quest() {
            prompt.push_str(
                r#"As an evil player, you can choose to:
- Play SUCCESS to maintain your cover
- Play FAIL to sabotage the quest.

Consider:
- Will sabotaging now reveal your identity?
- Is it better to wait for a later quest?
- What will other players deduce from the outcome?
"#,
            );
        } else {
            prompt.push_str("As a good player, you MUST play SUCCESS.\n");
        }

        prompt.push_str(
            r#"
Write your reasoning, then end with your decision in XML tags:
<QUEST_CARD>success</QUEST_CARD> or <QUEST_CARD>fail</QUEST_CARD>

Your private thoughts:"#,
        );
        prompt
    }

    /// The Assassin's single guess at Merlin
    pub fn assassination(ctx: &PromptContext<'_>) -> String {
        let mut prompt = Self::preamble(ctx);
        prompt.push_str(&format!(
            r#"Good has won 3 quests! However, as the Assassin, you have one final chance to win the game for evil.
You must now identify and assassinate Merlin. If you correctly identify Merlin, evil wins the game!

{}

---

Based on the entire game history, conversations, voting patterns, and quest outcomes,
you must now decide who is most likely to be Merlin.

Write your reasoning about who you believe is Merlin, then make your assassination choice in XML tags.

<ASSASSINATE>PlayerName</ASSASSINATE>

Your reasoning and decision:"#,
            Self::shared_sections(ctx),
        ));
        prompt
    }

    fn preamble(ctx: &PromptContext<'_>) -> String {
        let mut prompt = format!(
            r#"You are playing The Resistance: Avalon, a game of hidden loyalty and social deduction.

YOUR ROLE: {}
YOUR IDENTITY: {}

"#,
            ctx.role, ctx.player
        );

        prompt.push_str(&Self::role_knowledge(ctx.role, ctx.known_evil));
        prompt.push_str(&format!("Players: {}\n", join_players(&ctx.view.seating_order)));
        prompt.push_str(&format!("Current leader: {}\n", ctx.view.leader));
        if let Some(size) = ctx.view.team_size_required {
            prompt.push_str(&format!("Team size required: {}\n", size));
        }
        prompt.push('\n');
        prompt
    }

    fn role_knowledge(role: Role, known_evil: &[PlayerId]) -> String {
        match role {
            Role::Merlin => format!(
                "As Merlin, you know the evil players are: {}\n\
                 IMPORTANT: You must hide your identity! If the Assassin identifies you at the end, evil wins.\n\n",
                join_players(known_evil)
            ),
            Role::Assassin | Role::Minion if !known_evil.is_empty() => format!(
                "You know your evil allies are: {}\n\n",
                join_players(known_evil)
            ),
            Role::Assassin | Role::Minion => String::new(),
            Role::LoyalServant => "You do not have any special knowledge. \
                 You must use logic and discussion to identify evil players.\n\n"
                .to_string(),
        }
    }

    fn shared_sections(ctx: &PromptContext<'_>) -> String {
        format!(
            r#"CURRENT GAME STATE:
{}

---

YOUR PRIVATE THOUGHTS FROM PREVIOUS ROUNDS:
{}

---

CURRENT CONVERSATION (Round {}):
{}"#,
            ctx.view.to_pretty_json(),
            if ctx.private_notes.is_empty() {
                "(No previous thoughts yet)"
            } else {
                ctx.private_notes
            },
            ctx.view.round_number,
            if ctx.conversation.is_empty() {
                "(Conversation just starting)"
            } else {
                ctx.conversation
            },
        )
    }
}
