//! Host-side mocks shared by the integration tests
//!
//! `MockEngine` is a tiny object heap: plain objects with ordered
//! properties, arrays, and byte views over owned `Vec<u8>` storage.
//! `MockBoard` records every peripheral call.

#![allow(dead_code)]

use lodestone_core::bridge::{Context, NativeFn, NativeResult};
use lodestone_core::{BridgeConfig, BridgeError, BridgeState, ElementType, Engine, ObjectClass, ObjectRef, Value, ViewKind};
use lodestone_display::{DisplayBackend, DisplayError, TextStyle};
use lodestone_hal::{
    Analog, AnyKey, Backend, Board, CaptureMode, Clock, Dac, FsError, Gpio, Infrared, OpenMode, PinMode, PinNumber,
    Pwm, TouchSensor, Volumes,
};

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub enum Slot {
    Object {
        class: ObjectClass,
        props: Vec<(String, Value)>,
        elements: Vec<Value>,
    },
    View {
        kind: ViewKind,
        bytes: Vec<u8>,
        /// Element count reported by `length`, if different from the storage
        declared_len: Option<usize>,
        detached: bool,
    },
}

#[derive(Default)]
pub struct MockEngine {
    pub slots: Vec<Slot>,
    /// Objects, arrays and views created through the `Engine` trait
    pub allocations: usize,
    /// Calls to `set_index`
    pub index_writes: usize,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, slot: Slot) -> ObjectRef {
        self.slots.push(slot);
        ObjectRef((self.slots.len() - 1) as u32)
    }

    /// Test setup helper; not counted as an engine allocation
    pub fn typed(&mut self, ty: ElementType, bytes: &[u8]) -> Value {
        Value::View(self.push(Slot::View {
            kind: ViewKind::Typed(ty),
            bytes: bytes.to_vec(),
            declared_len: None,
            detached: false,
        }))
    }

    pub fn raw(&mut self, bytes: &[u8]) -> Value {
        Value::View(self.push(Slot::View {
            kind: ViewKind::Raw,
            bytes: bytes.to_vec(),
            declared_len: None,
            detached: false,
        }))
    }

    pub fn object(&mut self, props: &[(&str, Value)]) -> Value {
        self.object_of(ObjectClass::Plain, props)
    }

    pub fn object_of(&mut self, class: ObjectClass, props: &[(&str, Value)]) -> Value {
        Value::Object(self.push(Slot::Object {
            class,
            props: props.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            elements: Vec::new(),
        }))
    }

    pub fn array(&mut self, items: &[Value]) -> Value {
        Value::Object(self.push(Slot::Object {
            class: ObjectClass::Array,
            props: Vec::new(),
            elements: items.to_vec(),
        }))
    }

    pub fn error(&mut self, message: &str, stack: Option<&str>) -> Value {
        let mut props = vec![("message", Value::from(message))];
        if let Some(stack) = stack {
            props.push(("stack", Value::from(stack)));
        }
        self.object_of(ObjectClass::Error, &props)
    }

    /// Copy of a view's storage
    pub fn bytes(&self, view: &Value) -> Vec<u8> {
        match view.as_object().map(|o| &self.slots[o.0 as usize]) {
            Some(Slot::View { bytes, .. }) => bytes.clone(),
            _ => panic!("not a view"),
        }
    }

    pub fn prop(&mut self, obj: &Value, key: &str) -> Value {
        self.get(obj.as_object().expect("object"), key)
    }

    pub fn elements(&self, obj: &Value) -> Vec<Value> {
        match &self.slots[obj.as_object().expect("object").0 as usize] {
            Slot::Object { elements, .. } => elements.clone(),
            Slot::View { .. } => panic!("not an array"),
        }
    }

    pub fn set_declared_len(&mut self, view: &Value, len: usize) {
        if let Slot::View { declared_len, .. } = &mut self.slots[view.as_object().expect("view").0 as usize] {
            *declared_len = Some(len);
        }
    }

    /// `array.length = len` without touching the elements
    pub fn set_array_len(&mut self, array: &Value, len: f64) {
        if let Slot::Object { props, .. } = &mut self.slots[array.as_object().expect("array").0 as usize] {
            props.retain(|(k, _)| k != "length");
            props.push(("length".to_string(), Value::Number(len)));
        }
    }

    pub fn detach(&mut self, view: &Value) {
        if let Slot::View { detached, .. } = &mut self.slots[view.as_object().expect("view").0 as usize] {
            *detached = true;
        }
    }
}

fn number_to_string(n: f64) -> String {
    if n.is_finite() && n == n.trunc() && n.abs() < 1e21 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl Engine for MockEngine {
    fn class_of(&self, obj: ObjectRef) -> ObjectClass {
        match &self.slots[obj.0 as usize] {
            Slot::Object { class, .. } => *class,
            Slot::View { .. } => ObjectClass::Plain,
        }
    }

    fn view_kind(&self, obj: ObjectRef) -> Option<ViewKind> {
        match &self.slots[obj.0 as usize] {
            Slot::View { kind, .. } => Some(*kind),
            Slot::Object { .. } => None,
        }
    }

    fn get(&mut self, obj: ObjectRef, key: &str) -> Value {
        match &self.slots[obj.0 as usize] {
            Slot::Object { class, props, elements } => {
                if *class == ObjectClass::Array && key == "length" {
                    // An assigned `length` wins, as on a sparse script array
                    return props
                        .iter()
                        .find(|(k, _)| k == "length")
                        .map(|(_, v)| v.clone())
                        .unwrap_or(Value::Number(elements.len() as f64));
                }
                props
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.clone())
                    .unwrap_or(Value::Undefined)
            }
            Slot::View { kind, bytes, declared_len, .. } => {
                let width = kind.element_width();
                let count = declared_len.unwrap_or(bytes.len() / width);
                match (kind, key) {
                    (ViewKind::Typed(_), "length") => Value::Number(count as f64),
                    (_, "byteLength") => Value::Number((count * width) as f64),
                    _ => Value::Undefined,
                }
            }
        }
    }

    fn get_index(&mut self, obj: ObjectRef, index: u32) -> Value {
        match &self.slots[obj.0 as usize] {
            Slot::Object { elements, .. } => elements.get(index as usize).cloned().unwrap_or(Value::Undefined),
            Slot::View { bytes, .. } => bytes
                .get(index as usize)
                .map(|b| Value::Number(f64::from(*b)))
                .unwrap_or(Value::Undefined),
        }
    }

    fn set(&mut self, obj: ObjectRef, key: &str, value: Value) -> Result<(), BridgeError> {
        match &mut self.slots[obj.0 as usize] {
            Slot::Object { props, .. } => {
                match props.iter_mut().find(|(k, _)| k == key) {
                    Some((_, slot)) => *slot = value,
                    None => props.push((key.to_string(), value)),
                }
                Ok(())
            }
            Slot::View { .. } => Err(BridgeError::internal("mock: cannot set on view")),
        }
    }

    fn set_index(&mut self, obj: ObjectRef, index: u32, value: Value) -> Result<(), BridgeError> {
        self.index_writes += 1;
        match &mut self.slots[obj.0 as usize] {
            Slot::Object { class: ObjectClass::Array, elements, .. } => {
                let index = index as usize;
                if index >= elements.len() {
                    elements.resize(index + 1, Value::Undefined);
                }
                elements[index] = value;
                Ok(())
            }
            Slot::Object { props, .. } => {
                let key = index.to_string();
                match props.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, slot)) => *slot = value,
                    None => props.push((key, value)),
                }
                Ok(())
            }
            Slot::View { .. } => Err(BridgeError::internal("mock: indexed view writes go through fill")),
        }
    }

    fn own_keys(&mut self, obj: ObjectRef) -> Vec<String> {
        match &self.slots[obj.0 as usize] {
            Slot::Object { props, .. } => props.iter().map(|(k, _)| k.clone()).collect(),
            Slot::View { .. } => Vec::new(),
        }
    }

    fn new_object(&mut self, class: ObjectClass) -> Result<ObjectRef, BridgeError> {
        self.allocations += 1;
        Ok(self.push(Slot::Object {
            class,
            props: Vec::new(),
            elements: Vec::new(),
        }))
    }

    fn new_array(&mut self, len: u32) -> Result<ObjectRef, BridgeError> {
        self.allocations += 1;
        Ok(self.push(Slot::Object {
            class: ObjectClass::Array,
            props: Vec::new(),
            elements: vec![Value::Undefined; len as usize],
        }))
    }

    fn new_byte_view(&mut self, bytes: &[u8]) -> Result<ObjectRef, BridgeError> {
        self.allocations += 1;
        Ok(self.push(Slot::View {
            kind: ViewKind::Typed(ElementType::Uint8),
            bytes: bytes.to_vec(),
            declared_len: None,
            detached: false,
        }))
    }

    fn backing_store(&mut self, view: ObjectRef) -> Option<&mut [u8]> {
        match &mut self.slots[view.0 as usize] {
            Slot::View { bytes, detached: false, .. } => Some(bytes.as_mut_slice()),
            _ => None,
        }
    }

    fn to_number(&mut self, value: &Value) -> f64 {
        match value {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse().unwrap_or(f64::NAN)
                }
            }
            Value::Object(_) | Value::View(_) => f64::NAN,
        }
    }

    fn to_string(&mut self, value: &Value) -> Option<String> {
        Some(match value {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::String(s) => s.clone(),
            Value::View(_) => "[object Uint8Array]".to_string(),
            Value::Object(obj) => match self.class_of(*obj) {
                ObjectClass::Error => {
                    let name = self.get(*obj, "name");
                    let name = name.as_str().unwrap_or("Error").to_string();
                    match self.get(*obj, "message") {
                        Value::String(m) if !m.is_empty() => format!("{}: {}", name, m),
                        _ => name,
                    }
                }
                ObjectClass::Array => "[object Array]".to_string(),
                ObjectClass::Function => "function () { [native code] }".to_string(),
                ObjectClass::Plain | ObjectClass::Buffer => "[object Object]".to_string(),
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockGpio {
    pub modes: Vec<(PinNumber, PinMode)>,
    pub writes: Vec<(PinNumber, bool)>,
    pub high_pins: Vec<PinNumber>,
}

impl Gpio for MockGpio {
    fn pin_mode(&mut self, pin: PinNumber, mode: PinMode) {
        self.modes.push((pin, mode));
    }

    fn digital_write(&mut self, pin: PinNumber, high: bool) {
        self.writes.push((pin, high));
    }

    fn digital_read(&mut self, pin: PinNumber) -> bool {
        self.high_pins.contains(&pin)
    }
}

#[derive(Default)]
pub struct MockAnalog {
    pub configured: u32,
    pub reading: i32,
    pub writes: Vec<(PinNumber, i32)>,
    pub resolutions: Vec<(PinNumber, i32)>,
    pub frequencies: Vec<(PinNumber, i32)>,
}

impl Analog for MockAnalog {
    fn configure_adc(&mut self) {
        self.configured += 1;
    }

    fn analog_read(&mut self, _pin: PinNumber) -> i32 {
        self.reading
    }

    fn analog_write(&mut self, pin: PinNumber, value: i32) {
        self.writes.push((pin, value));
    }

    fn analog_write_resolution(&mut self, pin: PinNumber, bits: i32) {
        self.resolutions.push((pin, bits));
    }

    fn analog_write_frequency(&mut self, pin: PinNumber, hz: i32) {
        self.frequencies.push((pin, hz));
    }
}

pub struct MockPwm {
    pub accept: bool,
    pub calls: Vec<(&'static str, PinNumber, i32)>,
}

impl Default for MockPwm {
    fn default() -> Self {
        Self { accept: true, calls: Vec::new() }
    }
}

impl Pwm for MockPwm {
    fn attach(&mut self, pin: PinNumber, freq_hz: i32, _resolution_bits: i32) -> bool {
        self.calls.push(("attach", pin, freq_hz));
        self.accept
    }

    fn write(&mut self, pin: PinNumber, duty: i32) -> bool {
        self.calls.push(("write", pin, duty));
        self.accept
    }

    fn write_tone(&mut self, pin: PinNumber, freq_hz: i32) -> bool {
        self.calls.push(("tone", pin, freq_hz));
        self.accept
    }

    fn fade(&mut self, pin: PinNumber, _start_duty: i32, target_duty: i32, _fade_ms: i32) -> bool {
        self.calls.push(("fade", pin, target_duty));
        self.accept
    }

    fn change_frequency(&mut self, pin: PinNumber, freq_hz: i32, _resolution_bits: i32) -> bool {
        self.calls.push(("frequency", pin, freq_hz));
        self.accept
    }

    fn detach(&mut self, pin: PinNumber) -> bool {
        self.calls.push(("detach", pin, 0));
        self.accept
    }
}

pub struct MockTouch(pub i32);

impl TouchSensor for MockTouch {
    fn touch_read(&mut self, _pin: PinNumber) -> i32 {
        self.0
    }
}

#[derive(Default)]
pub struct MockDac {
    pub writes: Vec<(PinNumber, i32)>,
}

impl Dac for MockDac {
    fn dac_write(&mut self, pin: PinNumber, value: i32) {
        self.writes.push((pin, value));
    }
}

#[derive(Default)]
pub struct MockIr {
    pub transmitted: Vec<(Vec<u8>, bool)>,
    pub codes: Vec<(String, String, i32)>,
    /// Signal text delivered on the given poll (1-based)
    pub signal: Option<(usize, String)>,
    pub polls: usize,
    pub armed: Option<CaptureMode>,
    pub disarmed: bool,
}

impl Infrared for MockIr {
    fn transmit_buffer(&mut self, data: &[u8], hide_ui: bool) -> bool {
        self.transmitted.push((data.to_vec(), hide_ui));
        true
    }

    fn transmit_code(&mut self, protocol: &str, data: &str, bits: i32) -> bool {
        self.codes.push((protocol.to_string(), data.to_string(), bits));
        true
    }

    fn begin_capture(&mut self, mode: CaptureMode) {
        self.armed = Some(mode);
    }

    fn poll_capture(&mut self, out: &mut dyn core::fmt::Write) -> bool {
        self.polls += 1;
        match &self.signal {
            Some((at, text)) if *at == self.polls => out.write_str(text).is_ok(),
            _ => false,
        }
    }

    fn end_capture(&mut self) {
        self.disarmed = true;
    }
}

#[derive(Default)]
pub struct MockClock {
    pub now: u64,
    pub delays: Vec<u32>,
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        self.now += u64::from(ms);
    }
}

pub struct MockFile {
    data: Vec<u8>,
    pos: usize,
}

impl embedded_io::ErrorType for MockFile {
    type Error = core::convert::Infallible;
}

impl embedded_io::Read for MockFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

pub struct MockVolumes {
    pub files: Vec<(Backend, String, Vec<u8>)>,
    pub removable_mounted: bool,
    pub exists_checks: usize,
}

impl Default for MockVolumes {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            removable_mounted: true,
            exists_checks: 0,
        }
    }
}

impl MockVolumes {
    pub fn add(&mut self, backend: Backend, path: &str, data: &[u8]) {
        self.files.push((backend, path.to_string(), data.to_vec()));
    }
}

impl Volumes for MockVolumes {
    type File = MockFile;

    fn is_mounted(&self, backend: Backend) -> bool {
        backend == Backend::Primary || self.removable_mounted
    }

    fn exists(&mut self, backend: Backend, path: &str) -> bool {
        self.exists_checks += 1;
        self.is_mounted(backend) && self.files.iter().any(|(b, p, _)| *b == backend && p == path)
    }

    fn open(&mut self, backend: Backend, path: &str, _mode: OpenMode) -> Result<MockFile, FsError> {
        if !self.is_mounted(backend) {
            return Err(FsError::NotMounted);
        }
        self.files
            .iter()
            .find(|(b, p, _)| *b == backend && p == path)
            .map(|(_, _, data)| MockFile { data: data.clone(), pos: 0 })
            .ok_or(FsError::NotFound)
    }
}

#[derive(Default)]
pub struct MockBoard {
    pub gpio: MockGpio,
    pub analog: MockAnalog,
    pub pwm: MockPwm,
    pub touch: Option<MockTouch>,
    pub dac: Option<MockDac>,
    pub ir: MockIr,
    pub volumes: MockVolumes,
    pub clock: MockClock,
    pub display: String,
    pub serial: String,
}

impl Board for MockBoard {
    type Volumes = MockVolumes;

    fn gpio(&mut self) -> &mut dyn Gpio {
        &mut self.gpio
    }

    fn analog(&mut self) -> &mut dyn Analog {
        &mut self.analog
    }

    fn pwm(&mut self) -> &mut dyn Pwm {
        &mut self.pwm
    }

    fn touch(&mut self) -> Option<&mut dyn TouchSensor> {
        self.touch.as_mut().map(|t| t as &mut dyn TouchSensor)
    }

    fn dac(&mut self) -> Option<&mut dyn Dac> {
        self.dac.as_mut().map(|d| d as &mut dyn Dac)
    }

    fn infrared(&mut self) -> &mut dyn Infrared {
        &mut self.ir
    }

    fn volumes(&mut self) -> &mut MockVolumes {
        &mut self.volumes
    }

    fn clock(&mut self) -> &mut dyn Clock {
        &mut self.clock
    }

    fn display_text(&mut self) -> &mut dyn core::fmt::Write {
        &mut self.display
    }

    fn serial_text(&mut self) -> &mut dyn core::fmt::Write {
        &mut self.serial
    }
}

/// Engine, board, config and state for one test
#[derive(Default)]
pub struct Harness {
    pub engine: MockEngine,
    pub board: MockBoard,
    pub config: BridgeConfig,
    pub state: BridgeState,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call(&mut self, native: NativeFn<MockEngine, MockBoard>, this: &Value, args: &[Value]) -> NativeResult {
        let mut ctx = Context::new(&mut self.engine, &mut self.board, &self.config, &self.state);
        ctx.call(native, this, args)
    }

    pub fn native(&mut self, module: &str, name: &str, args: &[Value]) -> NativeResult {
        let native = lodestone_core::bridge::find_native::<MockEngine, MockBoard>(module, name)
            .unwrap_or_else(|| panic!("no native {}.{}", module, name));
        self.call(native, &Value::Undefined, args)
    }
}

// ---------------------------------------------------------------------------
// Fault reporter peripherals
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockDisplay {
    pub clears: usize,
    pub flushes: usize,
    pub draws: Vec<(u8, u8, String, TextStyle)>,
}

impl DisplayBackend for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clears += 1;
        self.draws.clear();
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str, style: TextStyle) -> Result<(), DisplayError> {
        self.draws.push((row, col, text.to_string(), style));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.flushes += 1;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (40, 30)
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct SerialLog {
    pub bytes: Vec<u8>,
    pub flushes: usize,
}

impl SerialLog {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl embedded_io::ErrorType for SerialLog {
    type Error = core::convert::Infallible;
}

impl embedded_io::Write for SerialLog {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

/// Reports a press on poll number `press_on` (1-based)
#[derive(Default)]
pub struct MockKeys {
    pub press_on: usize,
    pub polls: usize,
    pub begun: usize,
}

impl AnyKey for MockKeys {
    fn begin(&mut self) {
        self.begun += 1;
    }

    fn any_key_pressed(&mut self) -> bool {
        self.polls += 1;
        self.polls >= self.press_on
    }
}
