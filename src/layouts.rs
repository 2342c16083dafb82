use std::collections::HashMap;

use clap::ValueEnum;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Built-in layouts, embedded as keyboard-layout-editor JSON so generation
/// works without any layout file on disk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
pub enum KnownLayout {
    Ansi104,
    Ansi61,
    Numpad17,
}

impl KnownLayout {
    pub fn kle_json(&self) -> &'static str {
        match self {
            Self::Ansi104 => ANSI_104,
            Self::Ansi61 => ANSI_61,
            Self::Numpad17 => NUMPAD_17,
        }
    }
}

pub fn get_all_layouts() -> HashMap<KnownLayout, &'static str> {
    KnownLayout::iter().map(|l| (l, l.kle_json())).collect()
}

const ANSI_104: &str = r##"[
  {"name": "ANSI 104 (100%)"},
  ["Esc",{"x":1},"F1","F2","F3","F4",{"x":0.5},"F5","F6","F7","F8",{"x":0.5},"F9","F10","F11","F12",{"x":0.25},"PrtSc","Scroll Lock","Pause"],
  [{"y":0.5},"~","!","@","#","$","%","^","&","*","(",")","_","+",{"w":2},"Backspace",{"x":0.25},"Insert","Home","PgUp",{"x":0.25},"Num Lock","/","*","-"],
  [{"w":1.5},"Tab","Q","W","E","R","T","Y","U","I","O","P","{","}",{"w":1.5},"|",{"x":0.25},"Delete","End","PgDn",{"x":0.25},"7","8","9",{"h":2},"+"],
  [{"w":1.75},"Caps Lock","A","S","D","F","G","H","J","K","L",":","'",{"w":2.25},"Enter",{"x":3.5},"4","5","6"],
  [{"w":2.25},"Shift","Z","X","C","V","B","N","M","<",">","?",{"w":2.75},"Shift",{"x":1.25},"Up",{"x":1.25},"1","2","3",{"h":2},"Enter"],
  [{"w":1.25},"Ctrl",{"w":1.25},"Win",{"w":1.25},"Alt",{"w":6.25},"",{"w":1.25},"Alt",{"w":1.25},"Win",{"w":1.25},"Menu",{"w":1.25},"Ctrl",{"x":0.25},"Left","Down","Right",{"x":0.25},{"w":2},"0","."]
]"##;

const ANSI_61: &str = r##"[
  {"name": "ANSI 61 (60%)"},
  ["~","!","@","#","$","%","^","&","*","(",")","_","+",{"w":2},"Backspace"],
  [{"w":1.5},"Tab","Q","W","E","R","T","Y","U","I","O","P","{","}",{"w":1.5},"|"],
  [{"w":1.75},"Caps Lock","A","S","D","F","G","H","J","K","L",":","'",{"w":2.25},"Enter"],
  [{"w":2.25},"Shift","Z","X","C","V","B","N","M","<",">","?",{"w":2.75},"Shift"],
  [{"w":1.25},"Ctrl",{"w":1.25},"Win",{"w":1.25},"Alt",{"w":6.25},"",{"w":1.25},"Alt",{"w":1.25},"Win",{"w":1.25},"Menu",{"w":1.25},"Ctrl"]
]"##;

const NUMPAD_17: &str = r##"[
  {"name": "Numpad 17"},
  ["Num Lock","/","*","-"],
  ["7","8","9",{"h":2},"+"],
  ["4","5","6"],
  ["1","2","3",{"h":2},"Enter"],
  [{"w":2},"0","."]
]"##;
