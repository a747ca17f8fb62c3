//! Word game: the server guesses a word from a fixed vocabulary by asking
//! five attribute questions.
//!
//! Welcome -> Questioning (exactly five rounds) -> Verifying -> Done.
//! The text generator is consulted exactly twice per completed game: once
//! when questioning starts to obtain the five questions, once after the
//! fifth answer to produce the final guess.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{normalize_input, retry_prompt, StepOutcome, SuspendableGame, Suspension};
use crate::domain::session::{GameKind, Payload, WaitingFor, WordPayload, WordStage};
use crate::errors::GameError;
use crate::generator::{generate_with_timeout, TextGenerator};

/// Candidate words the player may choose from.
pub const WORDS: [&str; 6] = ["apple", "kiwi", "desk", "chair", "car", "pen"];

pub const QUESTION_COUNT: usize = 5;

pub const FALLBACK_QUESTION: &str = "Is it something commonly found at home?";

pub const SUCCESS_MESSAGE: &str =
    "Excellent! I guessed your word correctly! Thanks for playing!";
pub const PLAYER_WINS_MESSAGE: &str = "I didn't get it this time! You win! Thanks for playing!";

pub struct WordGame {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl WordGame {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    async fn generate(&self, prompt: &str) -> Result<String, GameError> {
        Ok(generate_with_timeout(self.generator.as_ref(), prompt, self.timeout).await?)
    }

    async fn step_word(
        &self,
        payload: &WordPayload,
        waiting_for: WaitingFor,
        input: &str,
    ) -> Result<StepOutcome, GameError> {
        match (payload.stage, waiting_for) {
            (WordStage::Welcome, WaitingFor::Ready) => {
                if !is_ready(input) {
                    return Ok(StepOutcome::Invalid {
                        retry_prompt: format!(
                            "Please choose a word from: {} and say 'ready'!",
                            word_list()
                        ),
                    });
                }
                let text = self.generate(&questions_prompt()).await?;
                let questions = parse_questions(&text);
                debug!(questions = questions.len(), "word game questions generated");

                let prompt = question_prompt(1, &questions[0]);
                Ok(StepOutcome::Continue(Suspension {
                    payload: Payload::WordGame(WordPayload {
                        stage: WordStage::Questioning,
                        questions_asked: 0,
                        questions,
                        asked_questions: Vec::new(),
                        answers: Vec::new(),
                    }),
                    waiting_for: WaitingFor::Question(1),
                    prompt,
                }))
            }
            (WordStage::Questioning, WaitingFor::Question(n)) => {
                let index = usize::from(n).saturating_sub(1);
                let consistent = payload.questions.len() == QUESTION_COUNT
                    && n >= 1
                    && usize::from(payload.questions_asked) == index
                    && payload.asked_questions.len() == index
                    && payload.answers.len() == index;
                if !consistent {
                    return Err(GameError::corrupted(
                        GameKind::WordGame,
                        waiting_for,
                        format!(
                            "question {n} does not follow {} answered",
                            payload.questions_asked
                        ),
                    ));
                }

                let question = &payload.questions[index];
                let Some(answer) = parse_answer(input) else {
                    return Ok(StepOutcome::Invalid {
                        retry_prompt: retry_prompt(
                            input,
                            "yes, no, or maybe",
                            &question_prompt(n, question),
                        ),
                    });
                };

                let mut next = payload.clone();
                next.asked_questions.push(question.clone());
                next.answers.push(answer.to_string());
                next.questions_asked += 1;

                if usize::from(next.questions_asked) < QUESTION_COUNT {
                    let following = n + 1;
                    let prompt = question_prompt(following, &next.questions[index + 1]);
                    return Ok(StepOutcome::Continue(Suspension {
                        payload: Payload::WordGame(next),
                        waiting_for: WaitingFor::Question(following),
                        prompt,
                    }));
                }

                let guess = self.generate(&guess_prompt(&next)).await?;
                next.stage = WordStage::Verifying;
                Ok(StepOutcome::Continue(Suspension {
                    payload: Payload::WordGame(next),
                    waiting_for: WaitingFor::Verify,
                    prompt: verification_prompt(&guess),
                }))
            }
            (WordStage::Verifying, WaitingFor::Verify) => {
                let final_message = if normalize_input(input) == "yes" {
                    SUCCESS_MESSAGE
                } else {
                    PLAYER_WINS_MESSAGE
                };
                Ok(StepOutcome::Done {
                    final_message: final_message.to_string(),
                })
            }
            (stage, other) => Err(GameError::corrupted(
                GameKind::WordGame,
                other,
                format!("unexpected in stage {stage:?}"),
            )),
        }
    }
}

#[async_trait]
impl SuspendableGame for WordGame {
    fn kind(&self) -> GameKind {
        GameKind::WordGame
    }

    fn start(&self) -> Suspension {
        Suspension {
            payload: Payload::WordGame(WordPayload {
                stage: WordStage::Welcome,
                questions_asked: 0,
                questions: Vec::new(),
                asked_questions: Vec::new(),
                answers: Vec::new(),
            }),
            waiting_for: WaitingFor::Ready,
            prompt: welcome_prompt(),
        }
    }

    async fn step(
        &self,
        payload: &Payload,
        waiting_for: WaitingFor,
        input: &str,
    ) -> Result<StepOutcome, GameError> {
        match payload {
            Payload::WordGame(word) => self.step_word(word, waiting_for, input).await,
            Payload::NumberGame(_) => Err(GameError::corrupted(
                GameKind::WordGame,
                waiting_for,
                "number game payload",
            )),
        }
    }
}

pub fn word_list() -> String {
    WORDS.join(", ")
}

pub fn welcome_prompt() -> String {
    format!(
        "Welcome to the Word Guessing Game!\n\nChoose one word from: {}\n\nSay 'ready' when you've chosen your word!",
        word_list()
    )
}

pub fn question_prompt(number: u8, question: &str) -> String {
    format!("Question {number}/{QUESTION_COUNT}: {question}\n\nPlease answer: yes, no, or maybe")
}

pub fn verification_prompt(guess: &str) -> String {
    format!("{guess}\n\nIs this correct? (yes/no)")
}

/// "ready" must appear as a word somewhere in the input.
fn is_ready(input: &str) -> bool {
    normalize_input(input)
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == "ready")
}

/// Normalize a yes/no/maybe answer.
fn parse_answer(input: &str) -> Option<&'static str> {
    match normalize_input(input).trim_end_matches(['.', '!']) {
        "yes" | "y" => Some("yes"),
        "no" | "n" => Some("no"),
        "maybe" => Some("maybe"),
        _ => None,
    }
}

pub fn questions_prompt() -> String {
    format!(
        "Generate {QUESTION_COUNT} strategic yes/no/maybe questions for a word guessing game.

AVAILABLE WORDS: {words}

Generate {QUESTION_COUNT} different strategic questions about properties, uses, or characteristics.
Do NOT guess words directly - ask about attributes that help narrow down choices.

Examples:
- \"Is it something you can eat?\"
- \"Is it found indoors?\"
- \"Is it made of wood?\"
- \"Can you hold it in your hand?\"
- \"Is it used for writing?\"

Return exactly {QUESTION_COUNT} questions, one per line, numbered 1-{QUESTION_COUNT}.",
        words = word_list()
    )
}

/// Extract exactly `QUESTION_COUNT` questions from generated text.
///
/// Lines without a '?' are ignored and list markers are stripped. Missing
/// slots are padded with `FALLBACK_QUESTION`.
pub fn parse_questions(text: &str) -> Vec<String> {
    let mut questions: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.contains('?'))
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(|line| line.trim_matches('"').to_string())
        .take(QUESTION_COUNT)
        .collect();

    questions.resize(QUESTION_COUNT, FALLBACK_QUESTION.to_string());
    questions
}

fn strip_list_marker(line: &str) -> &str {
    let digits = line.trim_start_matches(|c: char| c.is_ascii_digit());
    let unnumbered = if digits.len() < line.len() {
        digits.trim_start_matches(['.', ')', ':'])
    } else {
        line.trim_start_matches(['-', '*', '•'])
    };
    unnumbered.trim()
}

pub fn guess_prompt(payload: &WordPayload) -> String {
    let qa_text: String = payload
        .pairs()
        .enumerate()
        .map(|(i, (question, answer))| {
            let n = i + 1;
            format!("Q{n}: {question}\nA{n}: {answer}\n\n")
        })
        .collect();

    format!(
        "Based on the following Q&A pairs, guess the word from the available options.

AVAILABLE WORDS: {words}

QUESTIONS AND ANSWERS:
{qa_text}
Analyze the answers carefully and choose the most likely word.
Format: \"Based on your answers, I think your word is [WORD]\"
",
        words = word_list()
    )
}
