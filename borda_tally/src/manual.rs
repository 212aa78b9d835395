/*!

This is the long-form manual for `borda_tally` and `director-survey`.

## Scoring

Every category of nomination has a fixed rank space: the preferred candidates
can be ranked from 1 to 5, the candidates nominated as unsuitable from 1 to 2.
A vote at rank `r` in a space of `N` ranks is worth `N + 1 - r` points, and
the Borda score of a candidate is the sum of the points of all its votes.

| rank | preferred (N = 5) | unsuitable (N = 2) |
|------|-------------------|--------------------|
| 1    | 5                 | 2                  |
| 2    | 4                 | 1                  |
| 3    | 3                 |                    |
| 4    | 2                 |                    |
| 5    | 1                 |                    |

Candidates are then sorted by decreasing score. Two candidates with the same
score keep the order in which their names first appeared in the responses.

## Input format

`director-survey` reads the responses of the director selection form, exported
from the spreadsheet as tab-separated values (`.tsv`). The first row is the
header and is skipped.

Every response starts with the submission timestamp, for example
`14/03/2024 09:12:45`, followed by a tab. A free-text answer that contains a
line break is split over several physical lines by the export. Lines that do
not start with a timestamp are glued back (trimmed, without any separator) to
the end of the response above them.

The columns are read by position (counting from 0):

| column  | content                                     |
|---------|---------------------------------------------|
| 0       | timestamp                                   |
| 1, 2, 3 | 1st choice: name, qualities and skills, examples |
| 4, 5, 6 | 2nd choice: name, qualities and skills, examples |
| 7, 8, 9 | 3rd choice: name, qualities and skills, examples |
| 10, 11, 12 | 4th choice: name, qualities and skills, examples |
| 13, 14  | 1st unsuitable nomination: name, reason     |
| 15, 16  | 2nd unsuitable nomination: name, reason     |
| 17      | suggestions for the branch                  |

A choice name written as `5th choice ... Firstname Lastname` is counted as a
5th choice for `Firstname Lastname`, whatever the column it appears in.
An unsuitable nomination left blank or answered with `None` is ignored.

Double quotes are removed from all the free text.

## Report

Preferred candidates scoring strictly more than 30 points make the shortlist.
Their feedback, and the unsuitable feedback given about the same names, is
sent to an OpenAI-compatible chat completion service to be summarized. The
suggestions are summarized by a second, independent request.

The service is configured through the environment:
* `OPENAI_API_KEY` (required)
* `OPENAI_BASE_URL` (default `https://api.openai.com/v1`)
* `OPENAI_MODEL` (default `gpt-4o`)

```bash
OPENAI_API_KEY=... director-survey 'Director Selection (Responses).tsv'
```

Logging goes through `env_logger`: use `RUST_LOG=debug` or `--verbose` to
follow the parsing of every response.

*/
