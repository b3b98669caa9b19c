fn main() {
    lane_runner::game::run();
}
