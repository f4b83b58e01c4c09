//! Built-in rules evaluated against records extracted from real test sources.

use convlint_core::{Outcome, TestKind, Verdict};
use convlint_rules::{RuleRegistry, evaluate_all};
use convlint_scan::extract_records;
use pretty_assertions::assert_eq;

fn non_passing(path: &str, source: &str, kind: TestKind) -> Vec<(String, u32, Outcome)> {
    let records = extract_records(path, source, kind);
    evaluate_all(&RuleRegistry::builtin(), &records)
        .into_iter()
        .filter(|v: &Verdict| v.outcome != Outcome::Pass)
        .map(|v| (v.rule_id, v.record.line, v.outcome))
        .collect()
}

#[test]
fn well_written_component_test_passes_everything() {
    let source = r"
import { mount } from '@vue/test-utils'
import { describe, expect, it } from 'vitest'
import LoginForm from '../LoginForm.vue'

describe('LoginForm', () => {
  it('shows a validation error when the email is empty', async () => {
    const wrapper = mount(LoginForm)
    await wrapper.find('form').trigger('submit')
    expect(wrapper.find('[role=alert]').text()).toContain('Email is required')
  })
})
";
    assert_eq!(
        non_passing("src/__tests__/LoginForm.spec.ts", source, TestKind::Unit),
        vec![]
    );
}

#[test]
fn each_violation_is_reported_on_its_line() {
    let source = r"
describe('Cart', () => {
  it.only('works', () => {
    expect(1).toBe(1)
  })

  it('adds an item when the button is clicked', () => {
    const wrapper = mount(Cart)
    wrapper.find('button').trigger('click')
    expect(wrapper.vm.items).toHaveLength(1)
  })

  it('loads the saved cart from the server', async () => {
    const res = await fetch('/api/cart')
    await sleep(500)
  })
})
";
    let found = non_passing("src/__tests__/Cart.spec.ts", source, TestKind::Unit);
    assert_eq!(
        found,
        vec![
            ("R1".to_string(), 3, Outcome::Warn),
            ("R5".to_string(), 3, Outcome::Fail),
            ("R3".to_string(), 7, Outcome::Fail),
            ("R8".to_string(), 7, Outcome::Warn),
            ("R2".to_string(), 13, Outcome::Fail),
            ("R4".to_string(), 13, Outcome::Warn),
            ("R7".to_string(), 13, Outcome::Warn),
        ]
    );
}

#[test]
fn dynamic_names_warn_instead_of_passing() {
    let source = r"
it.each([1, 2])('doubles %i', (n) => {
  expect(n * 2).toBe(n + n)
})
const label = 'renders the footer'
it(label, () => {
  expect(true).toBe(true)
})
";
    let found = non_passing("src/__tests__/table.spec.ts", source, TestKind::Unit);
    assert_eq!(found, vec![("R1".to_string(), 6, Outcome::Warn)]);
}

#[test]
fn user_event_setup_is_not_an_async_operation() {
    let source = r"
it('submits the form when the button is clicked', async () => {
  const user = userEvent.setup()
  render(LoginForm)
  await user.click(screen.getByRole('button'))
  expect(screen.getByText('Sent')).toBeTruthy()
})
";
    assert_eq!(
        non_passing("src/__tests__/LoginForm.spec.ts", source, TestKind::Unit),
        vec![]
    );
}

#[test]
fn jsx_apostrophe_keeps_violations_on_their_own_test() {
    let source = r"
it('shows the banner text', () => {
  render(<p>Don't panic</p>)
  expect(screen.getByText(/panic/)).toBeTruthy()
})

it('loads the banner from the server', async () => {
  const res = await fetch('/api/banner')
  expect(res.ok).toBe(true)
})
";
    let found = non_passing("src/__tests__/Banner.spec.tsx", source, TestKind::Unit);
    assert_eq!(found, vec![("R2".to_string(), 7, Outcome::Fail)]);
}
