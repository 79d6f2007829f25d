//! Basic example of driving a session without a terminal

use termlink_core::{Dictionary, InputEvent, Session, SessionConfig, SessionState, SimpleRng};

fn main() {
    let words = [
        "ACCESS", "BREACH", "CIPHER", "DAEMON", "ENCODE", "FIBERS", "GLITCH", "HACKER", "KERNEL",
        "LOGGER", "MEMORY", "NEURAL", "OUTPUT", "PACKET", "ROUTER", "SCRIPT", "SERVER", "SYSTEM",
        "TOKENS", "VECTOR",
    ];
    let config = SessionConfig {
        panels: 2,
        rows: 17,
        columns: 12,
        word_count: 8,
        max_attempts: 4,
    };

    let dictionary = Dictionary::build(words, config.word_count).expect("word list is large enough");
    let mut rng = SimpleRng::with_seed(2077);
    let mut session = Session::new(config, &dictionary, &mut rng).expect("board fits");

    println!("Start address: {:#06X}", session.layout().start_address());
    println!("Hidden words:");
    for word in session.words() {
        println!("  panel {} [{:>3}, {:>3})  {}", word.panel, word.start, word.end, word.text);
    }

    // Guess every word in order, clicking on its first letter.
    let targets: Vec<_> = session.words().iter().map(|w| (w.text.clone(), w.coordinates[0])).collect();
    for (text, cell) in targets {
        if session.state().is_terminal() {
            break;
        }
        session.apply(InputEvent::PointerAt { x: cell.x, y: cell.y });
        match session.evaluate().expect("selection is valid") {
            SessionState::Won => println!(">{text}\n>Password accepted."),
            SessionState::Lost => println!(">{text}\n>Terminal locked."),
            SessionState::Running { feedback: Some(guess) } => {
                println!(">{}\n>Entry denied.\n>Likeness={}", guess.text, guess.score)
            }
            _ => {}
        }
    }

    println!("Attempts left: {}", session.attempts());
}
