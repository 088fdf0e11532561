//! "Did you mean?" suggestions for unknown command names.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::context::InvocationContext;

/// Regional indicator Y.
pub const CONFIRM_EMOJI: &str = "\u{1F1FE}";
/// Regional indicator N.
pub const REJECT_EMOJI: &str = "\u{1F1F3}";

/// Resolves an unknown command name to a replacement, or gives up.
#[async_trait]
pub trait TypoChecker: Send + Sync + 'static {
    async fn check(&self, ctx: &InvocationContext, name: &str) -> Option<String>;
}

/// Asks the user whether a suggestion is what they meant.
#[async_trait]
pub trait SuggestionPrompt: Send + Sync + 'static {
    async fn confirm(
        &self,
        ctx: &InvocationContext,
        typed: &str,
        suggestion: &str,
    ) -> anyhow::Result<bool>;
}

/// Suggests the registered name closest to what was typed.
pub struct JaroWinklerTypoChecker {
    min_similarity: f64,
    timeout: Duration,
    prompt: Arc<dyn SuggestionPrompt>,
}

impl JaroWinklerTypoChecker {
    pub fn new(min_similarity: f64, timeout: Duration, prompt: Arc<dyn SuggestionPrompt>) -> Self {
        Self {
            min_similarity,
            timeout,
            prompt,
        }
    }

    /// The closest candidate and its score, if any reaches the threshold.
    /// Ties go to the alphabetically first name.
    pub fn closest<'a, I>(&self, name: &str, candidates: I) -> Option<(&'a str, f64)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(&str, f64)> = None;
        for candidate in candidates {
            let score = jaro_winkler(name, candidate);
            let better = match best {
                Some((current, top)) => score > top || (score == top && candidate < current),
                None => true,
            };
            if better {
                best = Some((candidate, score));
            }
        }
        best.filter(|&(_, score)| score >= self.min_similarity)
    }
}

#[async_trait]
impl TypoChecker for JaroWinklerTypoChecker {
    async fn check(&self, ctx: &InvocationContext, name: &str) -> Option<String> {
        let names = ctx.router().commands().keys();
        let (suggestion, score) = self.closest(name, names.iter().map(String::as_str))?;
        let suggestion = suggestion.to_string();
        debug!(typed = name, %suggestion, score, "Suggesting command");

        match tokio::time::timeout(self.timeout, self.prompt.confirm(ctx, name, &suggestion)).await {
            Ok(Ok(true)) => Some(suggestion),
            Ok(Ok(false)) => None,
            Ok(Err(error)) => {
                warn!(error = %format!("{error:#}"), "Suggestion prompt failed");
                None
            }
            Err(_) => {
                debug!(typed = name, "Suggestion prompt timed out");
                None
            }
        }
    }
}

/// Posts the suggestion, adds 🇾/🇳 and waits for the author to pick one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactionPrompt;

#[async_trait]
impl SuggestionPrompt for ReactionPrompt {
    async fn confirm(
        &self,
        ctx: &InvocationContext,
        typed: &str,
        suggestion: &str,
    ) -> anyhow::Result<bool> {
        let text = format!("❗ Command `{typed}` not found. Did you mean `{suggestion}`? ❗");
        let prompt = ctx.reply(&text).await?;
        let platform = ctx.platform();
        platform.add_reaction(ctx.channel_id(), prompt, CONFIRM_EMOJI).await?;
        platform.add_reaction(ctx.channel_id(), prompt, REJECT_EMOJI).await?;

        let answer = platform
            .await_reaction(ctx.channel_id(), prompt, ctx.author().id)
            .await?;
        Ok(answer.as_deref() == Some(CONFIRM_EMOJI))
    }
}

fn jaro(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let window = (a.len().max(b.len()) / 2).saturating_sub(1);
    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;

    for (i, &ca) in a.iter().enumerate() {
        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(b.len());
        for j in start..end {
            if !b_matched[j] && b[j] == ca {
                a_matched[i] = true;
                b_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }
    if matches == 0 {
        return 0.0;
    }

    let mut transpositions = 0usize;
    let mut k = 0;
    for (i, &ca) in a.iter().enumerate() {
        if !a_matched[i] {
            continue;
        }
        while !b_matched[k] {
            k += 1;
        }
        if ca != b[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let t = transpositions as f64 / 2.0;
    (m / a.len() as f64 + m / b.len() as f64 + (m - t) / m) / 3.0
}

/// Jaro-Winkler similarity in `[0, 1]`: prefix scale 0.1, prefix capped at
/// four characters, boost applied above 0.7.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let similarity = jaro(&a, &b);
    if similarity <= 0.7 {
        return similarity;
    }

    let prefix = a
        .iter()
        .zip(&b)
        .take(4)
        .take_while(|(x, y)| x == y)
        .count();
    similarity + prefix as f64 * 0.1 * (1.0 - similarity)
}
