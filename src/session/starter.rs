/// The guide a fresh editor opens with.
pub const STARTER_DOCUMENT: &str = r#"[TOC]
# Markdown Editor Guide
Write markdown on the left and watch the preview update on the right.

- **Bold**, *italic*, ~~strikethrough~~, code blocks, tables and the rest of standard markdown
- Inline math like $E=mc^2$ and display math, typeset with KaTeX
- Table of contents, task lists and block quotes
- One-click import and export of markdown files
- Shortcuts: Ctrl+B (bold), Ctrl+I (italic), Ctrl+Z (undo)

## 1. Line breaks

- **Soft break (new line):** press **Enter** once.
- **Paragraph:** press **Enter** twice, leaving a blank line.

This is the first paragraph.

This is the second one, separated by a blank line.

## 2. Math

### Inline math
Use single dollar signs: the mass-energy relation is $E=mc^2$.
A one-line double-dollar span works the same way: $$E=mc^2$$.

### Display math
Math is displayed as a block only when double dollar signs wrap a body on its own lines:

$$
\int_a^b f(x) dx = F(b) - F(a)
$$

A determinant identity:
$$
\begin{vmatrix}
a_1+b_1 & a_2+b_2 & a_3+b_3 \\
c_1 & c_2 & c_3 \\
d_1 & d_2 & d_3
\end{vmatrix}
=
\begin{vmatrix}
a_1 & a_2 & a_3 \\
c_1 & c_2 & c_3 \\
d_1 & d_2 & d_3
\end{vmatrix}
+
\begin{vmatrix}
b_1 & b_2 & b_3 \\
c_1 & c_2 & c_3 \\
d_1 & d_2 & d_3
\end{vmatrix}
$$

## 3. Lists

### Unordered
- First item
- Second item
  - Nested item
- Third item

### Ordered
1. Step one
2. Step two
   1. Sub-step

### Tasks
- [x] Finished task
- [ ] Open task

## 4. More

> This is a block quote.

```javascript
// a code block
function hello() {
    console.log("Hello, World!");
}
```

| Header 1 | Header 2 |
|:------|:-----:|
| Left | Center |

---

You're ready to start writing!
"#;
