//! Prize Wheel entry point
//!
//! Web: wires the canvas, buttons and audio to the spin controller.
//! Native: runs a headless batch of spins and logs the observed distribution.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_wheel {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

    use prize_wheel::Settings;
    use prize_wheel::audio::AudioManager;
    use prize_wheel::wheel::{
        PrizeEditor, PrizeEntry, PrizeRegistry, RenderSink, SeededRandom, SpinController,
        label_anchor, pointer_tip, present, segment_angle,
    };

    const COLORS: [&str; 6] = ["#FF5733", "#33FF57", "#3357FF", "#FF33A2", "#A233FF", "#33FFF3"];

    /// Canvas2D wheel plus the trigger button label
    struct CanvasSink {
        ctx: CanvasRenderingContext2d,
        size: f64,
        button: Option<Element>,
    }

    impl RenderSink for CanvasSink {
        fn draw(&mut self, angle: f64, prizes: &[PrizeEntry]) {
            let ctx = &self.ctx;
            let radius = self.size / 2.0;
            let segment = segment_angle(prizes.len());

            ctx.clear_rect(0.0, 0.0, self.size, self.size);
            ctx.save();
            let _ = ctx.translate(radius, radius);

            for (i, prize) in prizes.iter().enumerate() {
                let start = i as f64 * segment + angle;
                ctx.begin_path();
                ctx.move_to(0.0, 0.0);
                let _ = ctx.arc(0.0, 0.0, radius, start, start + segment);
                ctx.close_path();
                ctx.set_fill_style_str(COLORS[i % COLORS.len()]);
                ctx.fill();
                ctx.set_stroke_style_str("#fff");
                ctx.stroke();

                let anchor = label_anchor(i, prizes.len(), angle, radius, 0.65);
                ctx.save();
                let _ = ctx.translate(anchor.x, anchor.y);
                let _ = ctx.rotate(start + segment / 2.0);
                ctx.set_fill_style_str("#000");
                ctx.set_text_align("center");
                ctx.set_font("bold 14px sans-serif");
                let _ = ctx.fill_text(&prize.label, 0.0, 0.0);
                ctx.restore();
            }

            // Pointer at 12 o'clock
            let tip = pointer_tip(radius * 0.85);
            ctx.begin_path();
            ctx.move_to(tip.x, tip.y);
            ctx.line_to(tip.x - 10.0, tip.y - radius * 0.15);
            ctx.line_to(tip.x + 10.0, tip.y - radius * 0.15);
            ctx.close_path();
            ctx.set_fill_style_str("#222");
            ctx.fill();

            ctx.restore();
        }

        fn announce(&mut self, _index: usize, label: &str) {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&format!("🎉 당첨: {label}"));
            }
        }

        fn spinning_changed(&mut self, spinning: bool) {
            if let Some(button) = &self.button {
                button.set_text_content(Some(if spinning { "Stop" } else { "Start" }));
            }
        }
    }

    /// Wheel instance holding all state
    struct Wheel {
        controller: SpinController,
        editor: PrizeEditor,
        settings: Settings,
        rng: SeededRandom,
        render: CanvasSink,
        audio: AudioManager,
        last_time: f64,
    }

    impl Wheel {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time) / 1000.0
            } else {
                0.0
            };
            self.last_time = time;

            self.controller.tick(dt);
            present(&mut self.controller, &mut self.render, &mut self.audio);
        }

        /// Push the editor's rows to the wheel (next spin if one is running)
        fn sync_prizes(&mut self) {
            match self.editor.snapshot() {
                Ok(registry) => {
                    self.controller.replace_prizes(registry);
                }
                Err(e) => log::warn!("Prize table not applied: {e}"),
            }
            update_table(&self.editor);
        }
    }

    fn update_table(editor: &PrizeEditor) {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("prizeTable"))
        else {
            return;
        };
        let text = editor
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let percent = editor.display_percent(i).unwrap_or_default();
                format!("{}. {}  {}%", i + 1, row.label, percent)
            })
            .collect::<Vec<_>>()
            .join("\n");
        el.set_text_content(Some(&text));
    }

    fn request_animation_frame(wheel: Rc<RefCell<Wheel>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            wheel_loop(wheel, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn wheel_loop(wheel: Rc<RefCell<Wheel>>, time: f64) {
        wheel.borrow_mut().frame(time);
        request_animation_frame(wheel);
    }

    fn on_click(id: &str, wheel: Rc<RefCell<Wheel>>, handler: fn(&mut Wheel)) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        else {
            log::warn!("Missing #{id}");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            handler(&mut wheel.borrow_mut());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Prize wheel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("wheelCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let registry = PrizeRegistry::default();
        let editor = PrizeEditor::from_registry(&registry, settings.max_segments);

        let wheel = Rc::new(RefCell::new(Wheel {
            controller: SpinController::new(registry, settings.tuning.clone()),
            editor,
            audio: AudioManager::new(settings.effective_volume()),
            settings,
            rng: SeededRandom::new(js_sys::Date::now() as u64),
            render: CanvasSink {
                ctx,
                size: canvas.width() as f64,
                button: document.get_element_by_id("controlBtn"),
            },
            last_time: 0.0,
        }));

        on_click("controlBtn", wheel.clone(), |w| {
            let Wheel { controller, rng, .. } = w;
            controller.activate(rng);
        });
        on_click("addRowBtn", wheel.clone(), |w| {
            let fixed = w.settings.jackpot_probability;
            match w.editor.add_balanced_row(fixed) {
                Ok(_) => w.sync_prizes(),
                Err(e) => log::warn!("{e}"),
            }
        });
        on_click("rebalanceBtn", wheel.clone(), |w| {
            let fixed = w.settings.jackpot_probability;
            match w.editor.rebalance(fixed) {
                Ok(()) => w.sync_prizes(),
                Err(e) => log::warn!("{e}"),
            }
        });
        on_click("muteBtn", wheel.clone(), |w| {
            let volume = w.settings.toggle_mute();
            w.audio.set_volume(volume);
            w.settings.save();
        });

        update_table(&wheel.borrow().editor);
        request_animation_frame(wheel);

        log::info!("Prize wheel running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_wheel::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use prize_wheel::Settings;
    use prize_wheel::wheel::{
        PrizeEntry, PrizeRegistry, RenderSink, SeededRandom, Silent, SpinController, SpinPhase,
        present,
    };

    /// Counts announced results instead of drawing
    struct Tally {
        counts: Vec<u32>,
    }

    impl RenderSink for Tally {
        fn draw(&mut self, _angle: f64, _prizes: &[PrizeEntry]) {}

        fn announce(&mut self, index: usize, _label: &str) {
            self.counts[index] += 1;
        }
    }

    env_logger::init();
    log::info!("Prize wheel (native) starting...");
    log::info!("Interactive wheel needs the web build - running a headless batch");

    let env_u64 = |name: &str, default: u64| {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    };
    let seed = env_u64("WHEEL_SEED", 42);
    let spins = env_u64("WHEEL_SPINS", 1000);

    let settings = Settings::load();
    let registry = PrizeRegistry::default();
    let mut tally = Tally {
        counts: vec![0; registry.len()],
    };
    let mut controller = SpinController::new(registry.clone(), settings.tuning.clone());
    let mut rng = SeededRandom::new(seed);
    let dt = 1.0 / 60.0;

    for _ in 0..spins {
        let announced: u32 = tally.counts.iter().sum();
        controller.activate(&mut rng);
        for _ in 0..30 {
            controller.tick(dt);
        }
        controller.activate(&mut rng);
        while controller.phase() != SpinPhase::Idle || tally.counts.iter().sum::<u32>() == announced
        {
            controller.tick(dt);
            present(&mut controller, &mut tally, &mut Silent);
        }
    }

    for (entry, count) in registry.entries().iter().zip(&tally.counts) {
        println!(
            "{:<24} expected {:>6.2}%  observed {:>6.2}%",
            entry.label,
            entry.probability * 100.0,
            *count as f64 * 100.0 / spins.max(1) as f64
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
