//! 터미널 출력 포맷팅 유틸리티
//!
//! 서비스 컨테이너 초기화 과정에서 사용되는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 완료 상태를 시각적으로 표현합니다.

/// 고정 너비 박스 안에 제목을 가운데 정렬하여 출력합니다.
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 초기화 완료 요약
pub fn print_final_summary(store_backend: &str, repositories: usize, services: usize) {
    println!();
    print_boxed_title("ACCESS GUARD INITIALIZED");
    println!("   🗄  Store backend: {}", store_backend);
    println!("   📦 Repositories: {}", repositories);
    println!("   🔧 Services: {}", services);
    println!();
}
