//! Static lesson catalog.
//!
//! One entry per digraph lesson, in teaching order. The catalog is the
//! authority on which lesson ids exist: progress entries are created for
//! exactly these ids and mutations naming any other id are ignored.

mod stickers;

pub use stickers::{Sticker, HUNT_STICKERS, MATCH_STICKERS, STICKER_ALBUM};

/// An example word with the emoji shown on its picture card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigraphWord {
    pub word: &'static str,
    pub image: &'static str,
}

/// Narration used by the lesson introduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroAudio {
    /// Introduces the first letter on its own.
    pub letter1: &'static str,
    /// Introduces the second letter on its own.
    pub letter2: &'static str,
    /// Explains the sound the two letters make together.
    pub together: &'static str,
}

/// A single lesson unit: one two-letter sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digraph {
    /// Stable lesson id (e.g. "sh"). Used as the progress key locally and remotely.
    pub id: &'static str,
    pub letters: &'static str,
    /// IPA transcription.
    pub sound: &'static str,
    /// Text sent to the speech engine when the sound is played.
    pub audio_text: &'static str,
    pub phonetic: &'static str,
    pub sound_label: &'static str,
    pub example_phrase: &'static str,
    pub intro: IntroAudio,
    pub mouth_position: &'static str,
    pub teaching_tip: &'static str,
    /// Words where the digraph starts the word.
    pub beginning: &'static [DigraphWord],
    /// Words where the digraph ends the word.
    pub ending: &'static [DigraphWord],
    pub special: &'static str,
    /// Display colour as `#RRGGBB`.
    pub color: &'static str,
    /// 1-based teaching order.
    pub order: u8,
}

impl Digraph {
    /// All example words, beginning words first.
    pub fn all_words(&self) -> impl Iterator<Item = &'static DigraphWord> {
        self.beginning.iter().chain(self.ending.iter())
    }

    pub fn word_count(&self) -> usize {
        self.beginning.len() + self.ending.len()
    }
}

/// Every lesson, ordered by `order`.
pub static DIGRAPHS: &[Digraph] = &[
    Digraph {
        id: "sh",
        letters: "SH",
        sound: "/ʃ/",
        audio_text: "shhhh... like when we say be quiet. Ship. Sheep. Shell.",
        phonetic: "shh, shh, shh",
        sound_label: "shhh",
        example_phrase: "like in ship",
        intro: IntroAudio {
            letter1: "This is the letter S. It usually says sss.",
            letter2: "This is the letter H. It usually says hhh.",
            together: "But when S and H are together, they make a special sound! They say shhhh! Like in ship!",
        },
        mouth_position: "Lips pushed forward, teeth together",
        teaching_tip: "Like saying quiet - shhh! 🤫",
        beginning: &[
            DigraphWord { word: "ship", image: "🚢" },
            DigraphWord { word: "sheep", image: "🐑" },
            DigraphWord { word: "shell", image: "🐚" },
            DigraphWord { word: "shoe", image: "👟" },
            DigraphWord { word: "shark", image: "🦈" },
        ],
        ending: &[
            DigraphWord { word: "fish", image: "🐟" },
            DigraphWord { word: "dish", image: "🍽️" },
            DigraphWord { word: "wish", image: "⭐" },
            DigraphWord { word: "brush", image: "🪥" },
            DigraphWord { word: "splash", image: "💦" },
        ],
        special: "squishy! 🧸",
        color: "#FF69B4",
        order: 1,
    },
    Digraph {
        id: "ch",
        letters: "CH",
        sound: "/tʃ/",
        audio_text: "ch ch ch... like a choo choo train! Cheese. Chair. Chicken.",
        phonetic: "ch, ch, ch",
        sound_label: "chhh",
        example_phrase: "like in cheese",
        intro: IntroAudio {
            letter1: "This is the letter C. It can say kuh or sss.",
            letter2: "This is the letter H. It usually says hhh.",
            together: "But when C and H are together, they make a train sound! Ch ch ch! Like choo choo! Or cheese!",
        },
        mouth_position: "Lips round, tongue behind top teeth",
        teaching_tip: "Like a choo choo train! 🚂",
        beginning: &[
            DigraphWord { word: "cheese", image: "🧀" },
            DigraphWord { word: "chair", image: "🪑" },
            DigraphWord { word: "chicken", image: "🐔" },
            DigraphWord { word: "cherry", image: "🍒" },
            DigraphWord { word: "chocolate", image: "🍫" },
        ],
        ending: &[
            DigraphWord { word: "beach", image: "🏖️" },
            DigraphWord { word: "peach", image: "🍑" },
            DigraphWord { word: "lunch", image: "🥪" },
            DigraphWord { word: "bench", image: "🪑" },
            DigraphWord { word: "teach", image: "👩‍🏫" },
        ],
        special: "Chilli! 🐕",
        color: "#9B59B6",
        order: 2,
    },
    Digraph {
        id: "th",
        letters: "TH",
        sound: "/θ/",
        audio_text: "thhhh... put your tongue between your teeth! This. That. Three.",
        phonetic: "th, th, th",
        sound_label: "thhh",
        example_phrase: "like in thumb",
        intro: IntroAudio {
            letter1: "This is the letter T. It usually says tuh.",
            letter2: "This is the letter H. It usually says hhh.",
            together: "But when T and H are together, they say thhhh! Stick your tongue out a tiny bit between your teeth! Like in thumb!",
        },
        mouth_position: "Tongue between your teeth!",
        teaching_tip: "Stick your tongue out a little! 😛",
        beginning: &[
            DigraphWord { word: "thumb", image: "👍" },
            DigraphWord { word: "three", image: "3️⃣" },
            DigraphWord { word: "think", image: "🤔" },
            DigraphWord { word: "thunder", image: "⛈️" },
            DigraphWord { word: "thanks", image: "🙏" },
        ],
        ending: &[
            DigraphWord { word: "bath", image: "🛁" },
            DigraphWord { word: "teeth", image: "🦷" },
            DigraphWord { word: "math", image: "🔢" },
            DigraphWord { word: "path", image: "🛤️" },
            DigraphWord { word: "moth", image: "🦋" },
        ],
        special: "the, that, this 📖",
        color: "#3498DB",
        order: 3,
    },
    Digraph {
        id: "wh",
        letters: "WH",
        sound: "/w/",
        audio_text: "wh wh wh... like blowing out a candle! Whale. What. White.",
        phonetic: "wh, wh, wh",
        sound_label: "whhh",
        example_phrase: "like in whale",
        intro: IntroAudio {
            letter1: "This is the letter W. It says wuh.",
            letter2: "This is the letter H. It usually says hhh.",
            together: "When W and H are together, they say wh! Like when you ask what? or where? Or like a big whale!",
        },
        mouth_position: "Lips in a small circle, blow air",
        teaching_tip: "Like blowing out a candle! 🕯️",
        beginning: &[
            DigraphWord { word: "whale", image: "🐋" },
            DigraphWord { word: "wheel", image: "🎡" },
            DigraphWord { word: "whisper", image: "🤫" },
            DigraphWord { word: "white", image: "🤍" },
            DigraphWord { word: "whistle", image: "📯" },
        ],
        ending: &[],
        special: "whale! 🐋",
        color: "#1ABC9C",
        order: 4,
    },
    Digraph {
        id: "ck",
        letters: "CK",
        sound: "/k/",
        audio_text: "ck ck ck... a quick sound at the end! Duck. Sock. Truck.",
        phonetic: "ck, ck, ck",
        sound_label: "kuh",
        example_phrase: "like in duck",
        intro: IntroAudio {
            letter1: "This is the letter C. It can say kuh.",
            letter2: "This is the letter K. It also says kuh.",
            together: "When C and K are together at the end of a word, they make one quick k sound! Like in duck! Or sock! Or clock tick tock!",
        },
        mouth_position: "Back of tongue touches the roof of mouth",
        teaching_tip: "A quick sound at the end! Like a clock! ⏰",
        beginning: &[],
        ending: &[
            DigraphWord { word: "duck", image: "🦆" },
            DigraphWord { word: "sock", image: "🧦" },
            DigraphWord { word: "clock", image: "🕐" },
            DigraphWord { word: "truck", image: "🚚" },
            DigraphWord { word: "rock", image: "🪨" },
            DigraphWord { word: "pink", image: "💗" },
        ],
        special: "duck! 🦆",
        color: "#F1C40F",
        order: 5,
    },
];

/// Look up a lesson by id.
pub fn by_id(id: &str) -> Option<&'static Digraph> {
    DIGRAPHS.iter().find(|d| d.id == id)
}

/// Look up a lesson by its 1-based teaching order.
pub fn by_order(order: u8) -> Option<&'static Digraph> {
    DIGRAPHS.iter().find(|d| d.order == order)
}

/// Whether `id` names a lesson in the catalog.
pub fn contains(id: &str) -> bool {
    by_id(id).is_some()
}

/// Lesson ids in teaching order.
pub fn lesson_ids() -> impl Iterator<Item = &'static str> {
    DIGRAPHS.iter().map(|d| d.id)
}
