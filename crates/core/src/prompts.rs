//! Specialist prompt catalog.
//!
//! Each analysis category gets a fixed prompt template encoding the
//! domain knowledge for reading that component family's markings. The
//! templates are the whole "algorithm" here -- the routing layer only
//! picks which one to send.

/// Identification prompt: forces a single-word category answer so the
/// router has something stable to match on.
pub const IDENTIFY: &str = "Analyze the electronic component in this image. Respond with only a \
     single-word category from this list: 'Resistor', 'Capacitor', 'IC', 'Transistor', 'Diode', \
     'LED', 'PCB', 'Other'.";

/// Resistor specialist: color bands for THT, printed code for SMD.
pub const RESISTOR: &str = r#"Analyze the resistor in the image, considering it could be a Through-Hole (THT) or Surface-Mount (SMD) type.

- If it is a THT resistor (cylindrical with wires): read its color bands from left to right to determine its resistance and tolerance. Based on its physical size, estimate its power rating (e.g. 1/4W, 1/2W, 1W).
- If it is an SMD resistor (small rectangular chip): read the numerical code printed on it (e.g. '103', '4R7') and calculate its resistance value, showing the calculation ('103' is 10 x 10^3 ohms = 10kOhm).

Respond with a concise markdown bullet list of the determined mounting type and specifications only. No extra narrative."#;

/// Capacitor specialist: body text for THT, numeric code for SMD.
pub const CAPACITOR: &str = r#"Analyze the capacitor in the image, considering it could be a Through-Hole (THT) or Surface-Mount (SMD) type.

- If it is a THT capacitor (e.g. electrolytic, ceramic disc): read the text on its body to find its capacitance (uF, nF, or pF) and its maximum voltage rating (V).
- If it is an SMD capacitor (small rectangular chip, usually brown or gray): look for a numerical code (e.g. '104') and interpret it, showing the calculation ('104' is 10 x 10^4 pF = 100nF). Many SMD capacitors are unmarked; if so, say so.

Respond with a concise markdown bullet list of the determined mounting type and specifications only. No extra narrative."#;

/// IC specialist: surface text, model number, manufacturer.
pub const IC: &str = "This is an Integrated Circuit (IC). Read all the text printed on its \
     surface. Identify the primary model number, any secondary numbers (date codes, batch \
     numbers), and the manufacturer if possible. Respond with a concise markdown bullet list of \
     specifications only.";

/// Generic fallback for diodes, transistors, LEDs, PCBs, and anything
/// the identify step could not place.
pub const GENERIC: &str = "Describe this electronic component, noting whether it appears to be \
     THT or SMD. Identify any markings, part numbers, or symbols on it and what they likely \
     mean. For diodes, identify the cathode band. For transistors, identify any part numbers. \
     Respond with a concise markdown bullet list of specifications only.";

/// Summarization instruction sent to the chat model together with the
/// raw specialist analysis.
pub const SUMMARIZE: &str = "Compress the following component analysis into a short markdown \
     bullet list containing only the identified specifications. Drop all reasoning, hedging, \
     and narrative. Keep units and tolerances.";

/// Build the system-level grounding instruction for follow-up chat.
///
/// Quotes the original analysis verbatim so every later turn is answered
/// in the context of the component that was actually photographed.
pub fn chat_grounding(analysis: &str) -> String {
    format!(
        "You are an electronics assistant. The user is asking follow-up questions about a \
         component that was analyzed earlier. The analysis was:\n\n{analysis}\n\nAnswer \
         questions about this specific component. If a question cannot be answered from the \
         analysis or general electronics knowledge, say so."
    )
}
