use crate::content::Language;

/// Every fixed string on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Text {
    Title,
    BackToMenu,
    Exhibition,
    StartExhibition,
    PrevModule,
    NextModule,
    Reset,
    Clear,
    ShowGuides,
    PlaybackSpeed,
    Play,
    Pause,
    PlayLoop,
    StopLoop,
    Volume,
    HarmonyName,
    TryCombinations,
    DrawMelody,
    VisualImpact,
    CurrentTempo,
    CurrentMode,
    Slow,
    Fast,
    DidYouKnow,
    TempoDesc,
    ItalianTerms,
    MetronomeSound,
    VoiceExperiment,
    VoiceHint,
    RecordVoice,
    StopRecord,
    PlayVoice,
    StopVoice,
    MicrophoneDenied,
    RhythmTagline,
    HarmonyTagline,
    Language,
    Theme,
    Quit,
}

/// Look up `key` in `language`.
pub fn text(key: Text, language: Language) -> &'static str {
    let (en, th) = match key {
        Text::Title => ("What Is Music?", "ดนตรีคืออะไร?"),
        Text::BackToMenu => ("Back to Menu", "กลับสู่เมนู"),
        Text::Exhibition => ("Interactive Exhibition", "นิทรรศการเสียงเชิงโต้ตอบ"),
        Text::StartExhibition => ("START EXHIBITION", "เริ่มชมนิทรรศการ"),
        Text::PrevModule => ("Previous", "ก่อนหน้า"),
        Text::NextModule => ("Next", "ถัดไป"),
        Text::Reset => ("RESET", "รีเซ็ต"),
        Text::Clear => ("CLEAR ALL", "ล้างทั้งหมด"),
        Text::ShowGuides => ("Show Guides", "แสดงเส้นไกด์"),
        Text::PlaybackSpeed => ("Playback Speed", "ความเร็วในการเล่น"),
        Text::Play => ("PLAY", "เล่น"),
        Text::Pause => ("PAUSE", "หยุดชั่วคราว"),
        Text::PlayLoop => ("PLAY LOOP", "เล่นวนลูป"),
        Text::StopLoop => ("STOP LOOP", "หยุดวนลูป"),
        Text::Volume => ("VOLUME", "ระดับเสียง"),
        Text::HarmonyName => ("Current Harmony", "เสียงประสานปัจจุบัน"),
        Text::TryCombinations => ("Try These Combinations:", "ลองผสมเสียงเหล่านี้:"),
        Text::DrawMelody => ("DRAW YOUR MELODY", "วาดทำนองของคุณ"),
        Text::VisualImpact => ("Visual Impact", "ผลกระทบทางสายตา"),
        Text::CurrentTempo => ("Current Tempo", "ความเร็วปัจจุบัน"),
        Text::CurrentMode => ("Current Mode:", "โหมดปัจจุบัน:"),
        Text::Slow => ("Slow", "ช้า"),
        Text::Fast => ("Fast", "เร็ว"),
        Text::DidYouKnow => ("Did you know?", "รู้หรือไม่?"),
        Text::TempoDesc => (
            "Tempo is the speed of the beat. Drag the slider to see how speed changes the energy of the shapes.",
            "เทมโปคือความเร็วของจังหวะ ลองเลื่อนแถบสไลด์เพื่อดูว่าความเร็วเปลี่ยนพลังงานของรูปทรงอย่างไร",
        ),
        Text::ItalianTerms => (
            "\"Italian terms are used for tempo because Italian composers were the first to formalize these indicators in the 17th century.\"",
            "\"คำศัพท์ภาษาอิตาลีถูกนำมาใช้เรียกเทมโป เนื่องจากนักประพันธ์เพลงชาวอิตาลีเป็นกลุ่มแรกที่เริ่มกำหนดสัญลักษณ์เหล่านี้อย่างเป็นทางการในศตวรรษที่ 17\"",
        ),
        Text::MetronomeSound => ("Metronome Sound", "เสียงเมโทรนอม"),
        Text::VoiceExperiment => ("Voice Experiment", "ทดลองกับเสียงของคุณ"),
        Text::VoiceHint => (
            "Record your voice, then change the tempo to hear it speed up or slow down.",
            "บันทึกเสียงของคุณ แล้วเปลี่ยนความเร็วเพื่อฟังเสียงที่เร็วขึ้นหรือช้าลง",
        ),
        Text::RecordVoice => ("RECORD VOICE", "บันทึกเสียง"),
        Text::StopRecord => ("STOP RECORDING", "หยุดบันทึก"),
        Text::PlayVoice => ("PLAY VOICE", "เล่นเสียง"),
        Text::StopVoice => ("STOP VOICE", "หยุดเสียง"),
        Text::MicrophoneDenied => ("Microphone access denied.", "ไม่สามารถเข้าถึงไมโครโฟนได้"),
        Text::RhythmTagline => ("Design a looping pattern.", "ออกแบบลวดลายจังหวะแบบวนซ้ำ"),
        Text::HarmonyTagline => (
            "Multiple notes played together to build texture.",
            "เสียงโน้ตหลายตัวที่เล่นพร้อมกันเพื่อสร้างมิติของเสียง",
        ),
        Text::Language => ("Language", "ภาษา"),
        Text::Theme => ("Theme", "ธีม"),
        Text::Quit => ("Quit", "ออก"),
    };
    match language {
        Language::En => en,
        Language::Th => th,
    }
}
