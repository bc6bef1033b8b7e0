fn main() {
	dream_graph::init_logging();
	leptos::mount::mount_to_body(dream_graph::App);
}
